//! Application services - Use case implementations

mod notification_service;
mod place_service;

pub use notification_service::NotificationService;
pub use place_service::{PlaceService, PlaceServiceError, PlaceServiceImpl};
