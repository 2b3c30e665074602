//! Neo4j persistence adapters
//!
//! This module implements the repository ports for Neo4j.

mod connection;
mod place_class_repository;
mod place_repository;

pub use connection::Neo4jConnection;
pub use place_class_repository::Neo4jPlaceClassRepository;
pub use place_repository::Neo4jPlaceRepository;

use anyhow::Result;

/// Combined repository providing access to all domain repositories
#[derive(Clone)]
pub struct Neo4jRepository {
    connection: Neo4jConnection,
}

impl Neo4jRepository {
    pub async fn new(uri: &str, user: &str, password: &str, database: &str) -> Result<Self> {
        let connection = Neo4jConnection::new(uri, user, password, database).await?;
        connection.initialize_schema().await?;
        Ok(Self { connection })
    }

    pub fn places(&self) -> Neo4jPlaceRepository {
        Neo4jPlaceRepository::new(self.connection.clone())
    }

    pub fn place_classes(&self) -> Neo4jPlaceClassRepository {
        Neo4jPlaceClassRepository::new(self.connection.clone())
    }
}
