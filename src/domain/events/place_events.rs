//! Place notifications - Messages describing what changed about a place
//!
//! Notifications are built only by the change differ, after a state
//! transition has committed, and are consumed exactly once by the
//! dispatcher. Their `args` are positional strings whose meaning depends
//! on the event kind (direction names, display names).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::PlaceId;

/// Entity kinds a notification can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationEntity {
    Place,
}

/// Everything that can happen to a place worth telling the world about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceEventKind {
    PlaceDestroy,
    PlaceClassChange,
    PlaceExitCreate,
    PlaceExitOpen,
    PlaceExitClose,
    PlaceExitLock,
    PlaceExitUnlock,
}

impl PlaceEventKind {
    /// Localization key for the message presented to players
    pub fn message_key(self) -> &'static str {
        match self {
            PlaceEventKind::PlaceDestroy => "place.destroy",
            PlaceEventKind::PlaceClassChange => "place.class.change",
            PlaceEventKind::PlaceExitCreate => "place.exit.create",
            PlaceEventKind::PlaceExitOpen => "place.exit.open",
            PlaceEventKind::PlaceExitClose => "place.exit.close",
            PlaceEventKind::PlaceExitLock => "place.exit.lock",
            PlaceEventKind::PlaceExitUnlock => "place.exit.unlock",
        }
    }
}

/// A single notification message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceNotification {
    pub entity: NotificationEntity,
    pub entity_id: PlaceId,
    pub event: PlaceEventKind,
    pub message_key: String,
    /// Positional message arguments
    pub args: Vec<String>,
    /// Secondary place of interest, when one exists
    pub target_entity: Option<NotificationEntity>,
    pub target_entity_id: Option<PlaceId>,
    /// World the change happened in; absent when the caller context
    /// carries no world
    pub world_name: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl PlaceNotification {
    pub fn new(entity_id: PlaceId, event: PlaceEventKind) -> Self {
        Self {
            entity: NotificationEntity::Place,
            entity_id,
            event,
            message_key: event.message_key().to_string(),
            args: Vec::new(),
            target_entity: None,
            target_entity_id: None,
            world_name: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    pub fn with_target(mut self, target_id: PlaceId) -> Self {
        self.target_entity = Some(NotificationEntity::Place);
        self.target_entity_id = Some(target_id);
        self
    }

    pub fn with_world(mut self, world_name: Option<String>) -> Self {
        self.world_name = world_name;
        self
    }
}
