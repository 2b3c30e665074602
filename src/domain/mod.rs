//! Domain layer - Core business logic with no external dependencies
//!
//! This layer contains:
//! - Entities: Place, PlaceClass and the owned attr/exit records
//! - Value Objects: typed ids, exit directions
//! - Domain Services: pure reconciliation and health rules
//! - Domain Events: place change notifications

pub mod entities;
pub mod events;
pub mod services;
pub mod value_objects;
