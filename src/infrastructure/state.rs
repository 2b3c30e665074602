//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::ports::outbound::PlaceClassRepositoryPort;
use crate::application::services::{NotificationService, PlaceServiceImpl};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::notifications::BroadcastNotificationPort;
use crate::infrastructure::persistence::Neo4jRepository;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    /// Reference-data routes talk to the class repository directly
    pub place_classes: Arc<dyn PlaceClassRepositoryPort>,
    pub place_service: PlaceServiceImpl,
    /// Notification fan-out, subscribed to by the WebSocket feed
    pub notifications: Arc<BroadcastNotificationPort>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = Neo4jRepository::new(
            &config.neo4j_uri,
            &config.neo4j_user,
            &config.neo4j_password,
            &config.neo4j_database,
        )
        .await?;

        let notifications = Arc::new(BroadcastNotificationPort::new(config.place_topic.clone()));
        let place_classes: Arc<dyn PlaceClassRepositoryPort> =
            Arc::new(repository.place_classes());

        let place_service = PlaceServiceImpl::new(
            Arc::new(repository.places()),
            place_classes.clone(),
            NotificationService::new(notifications.clone()),
        );

        Ok(Self {
            config,
            place_classes,
            place_service,
            notifications,
        })
    }
}
