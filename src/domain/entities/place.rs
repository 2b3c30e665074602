//! Place entity - Location nodes in the world graph

use serde::{Deserialize, Serialize};

use crate::domain::entities::PlaceClass;
use crate::domain::value_objects::{Direction, PlaceId};

/// A place in the world
///
/// A place exclusively owns its attributes and exits; both live and die
/// with it. The class is shared reference data and can change over the
/// place's lifetime (requested reclassification or demise on destruction).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: PlaceId,
    /// Display name override; falls back to the class name when absent
    pub name: Option<String>,
    pub place_class: PlaceClass,
    pub attrs: Vec<PlaceAttr>,
    pub exits: Vec<PlaceExit>,
}

impl Place {
    pub fn new(place_class: PlaceClass) -> Self {
        Self {
            id: PlaceId::new(),
            name: None,
            place_class,
            attrs: Vec::new(),
            exits: Vec::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Name shown to players: the place's own name, else its class name
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.place_class.name)
    }

    pub fn attr(&self, code: &str) -> Option<&PlaceAttr> {
        self.attrs.iter().find(|a| a.code == code)
    }

    pub fn attr_value(&self, code: &str) -> Option<i32> {
        self.attr(code).map(|a| a.value)
    }

    pub fn exit(&self, direction: Direction) -> Option<&PlaceExit> {
        self.exits.iter().find(|e| e.direction == direction)
    }

    pub fn has_exit(&self, direction: Direction) -> bool {
        self.exit(direction).is_some()
    }
}

/// An attribute owned by a place
///
/// Identity within the owning place is the attribute code; reconciliation
/// overwrites `value` in place so the store sees an update rather than a
/// delete plus insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceAttr {
    pub code: String,
    pub value: i32,
}

impl PlaceAttr {
    pub fn new(code: impl Into<String>, value: i32) -> Self {
        Self {
            code: code.into(),
            value,
        }
    }
}

/// A directed, flagged exit from one place to another
///
/// Identity is the direction alone: an exit with the same direction but
/// different flags is the same exit with changed flags, not a different
/// exit. Full structural equality is deliberately not derived.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceExit {
    pub direction: Direction,
    pub target_place: PlaceId,
    pub visible: bool,
    pub opened: bool,
    pub locked: bool,
}

impl PlaceExit {
    pub fn new(direction: Direction, target_place: PlaceId) -> Self {
        Self {
            direction,
            target_place,
            visible: true,
            opened: true,
            locked: false,
        }
    }

    /// Identity comparison: same exit if and only if same direction
    pub fn same_exit(&self, other: &PlaceExit) -> bool {
        self.direction == other.direction
    }
}

/// Requested state for one exit, as carried by an update request
///
/// Direction-less: the request keys exits by direction, this is the
/// payload under that key.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ExitState {
    pub target_place: PlaceId,
    pub visible: bool,
    pub opened: bool,
    pub locked: bool,
}

impl ExitState {
    pub fn to_exit(self, direction: Direction) -> PlaceExit {
        PlaceExit {
            direction,
            target_place: self.target_place,
            visible: self.visible,
            opened: self.opened,
            locked: self.locked,
        }
    }
}
