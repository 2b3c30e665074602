//! Place request/response shapes
//!
//! The request side is the canonical place representation the engine
//! consumes: optional name, class code, attr map, exit map. The response
//! side mirrors it and enriches each exit with the target place's class
//! name for display.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{ExitState, Place, PlaceExit};
use crate::domain::value_objects::{Direction, PlaceId};

/// Desired place state carried by an update request
#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlaceRequest {
    #[serde(default)]
    pub name: Option<String>,
    pub class_code: String,
    #[serde(default)]
    pub attrs: BTreeMap<String, i32>,
    /// Absent exits leave the current exits untouched; an empty map
    /// removes them all
    #[serde(default)]
    pub exits: Option<BTreeMap<Direction, ExitRequest>>,
}

/// Requested state for one exit
#[derive(Debug, Clone, Deserialize)]
pub struct ExitRequest {
    pub target_place_id: PlaceId,
    #[serde(default = "default_true")]
    pub visible: bool,
    #[serde(default = "default_true")]
    pub opened: bool,
    #[serde(default)]
    pub locked: bool,
}

fn default_true() -> bool {
    true
}

impl From<&ExitRequest> for ExitState {
    fn from(req: &ExitRequest) -> Self {
        ExitState {
            target_place: req.target_place_id,
            visible: req.visible,
            opened: req.opened,
            locked: req.locked,
        }
    }
}

/// Request to create a place attached to an existing one
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlaceRequest {
    pub place_class_code: String,
    pub direction: Direction,
    pub target_place_id: PlaceId,
}

/// A place as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct PlaceResponse {
    pub id: PlaceId,
    pub name: Option<String>,
    pub class_code: String,
    pub class_name: String,
    pub attrs: BTreeMap<String, i32>,
    pub exits: BTreeMap<Direction, ExitResponse>,
}

/// One exit as returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct ExitResponse {
    pub target_place_id: PlaceId,
    /// Class name of the place behind the exit, when it still exists
    pub name: Option<String>,
    pub visible: bool,
    pub opened: bool,
    pub locked: bool,
}

impl PlaceResponse {
    /// Build a response from a place, resolving each exit's display name
    /// through the supplied lookup (target place's class name).
    pub fn from_place<F>(place: &Place, mut exit_name: F) -> Self
    where
        F: FnMut(&PlaceExit) -> Option<String>,
    {
        Self {
            id: place.id,
            name: place.name.clone(),
            class_code: place.place_class.code.clone(),
            class_name: place.place_class.name.clone(),
            attrs: place
                .attrs
                .iter()
                .map(|a| (a.code.clone(), a.value))
                .collect(),
            exits: place
                .exits
                .iter()
                .map(|e| {
                    (
                        e.direction,
                        ExitResponse {
                            target_place_id: e.target_place,
                            name: exit_name(e),
                            visible: e.visible,
                            opened: e.opened,
                            locked: e.locked,
                        },
                    )
                })
                .collect(),
        }
    }
}
