//! Domain entities

mod place;
mod place_class;

pub use place::{ExitState, Place, PlaceAttr, PlaceExit};
pub use place_class::PlaceClass;
