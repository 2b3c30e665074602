//! Data Transfer Objects - For API boundaries
//!
//! DTOs live in the application layer so infrastructure (HTTP/WebSocket)
//! can serialize/deserialize without pulling wire concerns into the
//! domain model.

pub mod place;
pub mod place_class;

pub use place::*;
pub use place_class::*;
