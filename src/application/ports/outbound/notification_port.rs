//! Notification port - Interface for dispatching place notifications
//!
//! Dispatch is a best-effort side channel that runs after the state
//! transition committed. Transport failures are the dispatcher's problem,
//! never the engine's.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::events::PlaceNotification;

/// Ambient caller context for one engine operation
///
/// Passed explicitly into the differ and dispatcher rather than looked up
/// from task-local state. An absent world name is a normal input, not an
/// error, and stamps outgoing notifications with no world.
#[derive(Debug, Clone, Default)]
pub struct WorldContext {
    pub world_name: Option<String>,
    /// Credential forwarded to the transport when present
    pub auth_token: Option<String>,
}

impl WorldContext {
    pub fn new(world_name: Option<String>, auth_token: Option<String>) -> Self {
        Self {
            world_name,
            auth_token,
        }
    }
}

/// Port for the notification transport
#[async_trait]
pub trait NotificationPort: Send + Sync {
    /// Send one notification, optionally tagged with a caller credential
    async fn send(&self, notification: &PlaceNotification, auth_token: Option<&str>)
        -> Result<()>;
}
