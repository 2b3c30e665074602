//! Application configuration

use std::env;

use anyhow::{Context, Result};

use crate::infrastructure::notifications::TOPIC_DISABLED;

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Neo4j connection URI
    pub neo4j_uri: String,
    /// Neo4j username
    pub neo4j_user: String,
    /// Neo4j password
    pub neo4j_password: String,
    /// Neo4j database name
    pub neo4j_database: String,

    /// Notification topic name; "disabled" turns dispatch off
    pub place_topic: String,

    /// HTTP server port
    pub server_port: u16,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            neo4j_uri: env::var("NEO4J_URI")
                .unwrap_or_else(|_| "bolt://localhost:7687".to_string()),
            neo4j_user: env::var("NEO4J_USER").unwrap_or_else(|_| "neo4j".to_string()),
            neo4j_password: env::var("NEO4J_PASSWORD")
                .context("NEO4J_PASSWORD environment variable is required")?,
            neo4j_database: env::var("NEO4J_DATABASE").unwrap_or_else(|_| "neo4j".to_string()),

            place_topic: env::var("PLACE_TOPIC").unwrap_or_else(|_| TOPIC_DISABLED.to_string()),

            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
        })
    }
}
