//! Repository ports - Interfaces for data persistence
//!
//! These traits define the contracts that infrastructure repositories must
//! implement. Application services depend on these traits, not concrete
//! implementations. Store-level failures propagate unmodified.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::{Place, PlaceClass};
use crate::domain::value_objects::PlaceId;

/// Repository port for Place operations
///
/// `save` is an upsert: it persists a new place or overwrites an existing
/// one together with its owned attrs and exits. The store is expected to
/// commit each call atomically and to enforce single-writer-per-place
/// isolation; the engine does no locking of its own.
#[async_trait]
pub trait PlaceRepositoryPort: Send + Sync {
    /// Get a place by id
    async fn get(&self, id: PlaceId) -> Result<Option<Place>>;

    /// Persist a place with its owned attrs and exits
    async fn save(&self, place: &Place) -> Result<()>;

    /// Delete a place and everything it owns
    async fn delete(&self, id: PlaceId) -> Result<()>;
}

/// Repository port for PlaceClass reference data
#[async_trait]
pub trait PlaceClassRepositoryPort: Send + Sync {
    /// Get a place class by code
    async fn get(&self, code: &str) -> Result<Option<PlaceClass>>;

    /// List all place classes
    async fn list(&self) -> Result<Vec<PlaceClass>>;

    /// Persist a place class
    async fn save(&self, place_class: &PlaceClass) -> Result<()>;
}
