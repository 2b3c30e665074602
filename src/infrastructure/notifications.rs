//! Notification transport - broadcast channel behind the NotificationPort
//!
//! Dispatched notifications are fanned out to every connected WebSocket
//! subscriber. A topic named `disabled` turns the transport off entirely,
//! which is also the default when no topic is configured.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::broadcast;

use crate::application::ports::outbound::NotificationPort;
use crate::domain::events::PlaceNotification;

/// Topic name that disables dispatch
pub const TOPIC_DISABLED: &str = "disabled";

/// One message on the wire: the notification plus transport metadata
#[derive(Debug, Clone, Serialize)]
pub struct NotificationEnvelope {
    pub topic: String,
    /// Caller credential forwarded alongside the message, when present
    pub auth_token: Option<String>,
    pub message: PlaceNotification,
}

/// NotificationPort adapter over a tokio broadcast channel
pub struct BroadcastNotificationPort {
    topic: String,
    sender: broadcast::Sender<NotificationEnvelope>,
}

impl BroadcastNotificationPort {
    pub fn new(topic: impl Into<String>) -> Self {
        // Capacity bounds how far a slow subscriber may lag; laggards
        // skip messages rather than block dispatch
        let (sender, _) = broadcast::channel(256);
        Self {
            topic: topic.into(),
            sender,
        }
    }

    /// Subscribe to the dispatched notification stream
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationEnvelope> {
        self.sender.subscribe()
    }

    pub fn is_disabled(&self) -> bool {
        self.topic == TOPIC_DISABLED
    }
}

#[async_trait]
impl NotificationPort for BroadcastNotificationPort {
    async fn send(
        &self,
        notification: &PlaceNotification,
        auth_token: Option<&str>,
    ) -> Result<()> {
        if self.is_disabled() {
            tracing::debug!(
                entity_id = %notification.entity_id,
                "Notification topic disabled, dropping message"
            );
            return Ok(());
        }

        let envelope = NotificationEnvelope {
            topic: self.topic.clone(),
            auth_token: auth_token.map(str::to_string),
            message: notification.clone(),
        };

        // A send error only means no subscriber is currently listening;
        // the contract is best-effort fan-out, not delivery
        if self.sender.send(envelope).is_err() {
            tracing::debug!(
                entity_id = %notification.entity_id,
                "No notification subscribers connected"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::PlaceEventKind;
    use crate::domain::value_objects::PlaceId;

    fn notification() -> PlaceNotification {
        PlaceNotification::new(PlaceId::new(), PlaceEventKind::PlaceDestroy)
            .with_args(vec!["Old Mill".to_string()])
    }

    #[tokio::test]
    async fn test_subscriber_receives_envelope() {
        let port = BroadcastNotificationPort::new("place.topic");
        let mut rx = port.subscribe();

        port.send(&notification(), Some("token-123")).await.unwrap();

        let envelope = rx.recv().await.unwrap();
        assert_eq!(envelope.topic, "place.topic");
        assert_eq!(envelope.auth_token.as_deref(), Some("token-123"));
        assert_eq!(envelope.message.event, PlaceEventKind::PlaceDestroy);
    }

    #[tokio::test]
    async fn test_disabled_topic_drops_messages() {
        let port = BroadcastNotificationPort::new(TOPIC_DISABLED);
        let mut rx = port.subscribe();

        port.send(&notification(), None).await.unwrap();

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_send_without_subscribers_is_not_an_error() {
        let port = BroadcastNotificationPort::new("place.topic");
        assert!(port.send(&notification(), None).await.is_ok());
    }
}
