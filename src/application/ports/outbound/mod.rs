//! Outbound ports - Interfaces that the application requires from external systems

mod notification_port;
mod repository_port;

pub use notification_port::{NotificationPort, WorldContext};
pub use repository_port::{PlaceClassRepositoryPort, PlaceRepositoryPort};
