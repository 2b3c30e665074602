//! Value objects - Immutable domain values without identity

mod direction;
mod ids;

pub use direction::Direction;
pub use ids::PlaceId;
