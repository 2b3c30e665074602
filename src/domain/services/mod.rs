//! Domain services - Pure business logic operations
//!
//! The reconcilers mutate the owned collections they are handed and
//! nothing else; persistence is the caller's concern.

pub mod attribute_sync;
pub mod exit_sync;
pub mod health;
