//! Neo4j connection management

use anyhow::{Context, Result};
use neo4rs::{query, ConfigBuilder, Graph};

/// Shared Neo4j connection
///
/// `Graph` is internally pooled, so cloning this handle is cheap and every
/// repository can own one.
#[derive(Clone)]
pub struct Neo4jConnection {
    graph: Graph,
}

impl Neo4jConnection {
    pub async fn new(uri: &str, user: &str, password: &str, database: &str) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(uri)
            .user(user)
            .password(password)
            .db(database)
            .build()
            .context("Invalid Neo4j configuration")?;

        let graph = Graph::connect(config)
            .await
            .context("Failed to connect to Neo4j")?;

        Ok(Self { graph })
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Create uniqueness constraints for the node keys
    pub async fn initialize_schema(&self) -> Result<()> {
        let constraints = [
            "CREATE CONSTRAINT place_id IF NOT EXISTS
             FOR (p:Place) REQUIRE p.id IS UNIQUE",
            "CREATE CONSTRAINT place_class_code IF NOT EXISTS
             FOR (c:PlaceClass) REQUIRE c.code IS UNIQUE",
        ];

        for constraint in constraints {
            self.graph.run(query(constraint)).await?;
        }

        tracing::info!("Neo4j schema initialized");
        Ok(())
    }
}
