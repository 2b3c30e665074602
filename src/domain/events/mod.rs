//! Domain events - Notifications of significant state changes

mod place_events;

pub use place_events::{NotificationEntity, PlaceEventKind, PlaceNotification};
