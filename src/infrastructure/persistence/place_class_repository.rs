//! PlaceClass repository implementation for Neo4j

use anyhow::Result;
use async_trait::async_trait;
use neo4rs::{query, Row};

use super::connection::Neo4jConnection;
use crate::application::ports::outbound::PlaceClassRepositoryPort;
use crate::domain::entities::PlaceClass;

/// Repository for PlaceClass reference data
pub struct Neo4jPlaceClassRepository {
    connection: Neo4jConnection,
}

impl Neo4jPlaceClassRepository {
    pub fn new(connection: Neo4jConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PlaceClassRepositoryPort for Neo4jPlaceClassRepository {
    async fn get(&self, code: &str) -> Result<Option<PlaceClass>> {
        let q = query(
            "MATCH (c:PlaceClass {code: $code})
            RETURN c",
        )
        .param("code", code);

        let mut result = self.connection.graph().execute(q).await?;

        if let Some(row) = result.next().await? {
            Ok(Some(row_to_place_class(row)?))
        } else {
            Ok(None)
        }
    }

    async fn list(&self) -> Result<Vec<PlaceClass>> {
        let q = query(
            "MATCH (c:PlaceClass)
            RETURN c
            ORDER BY c.code",
        );

        let mut result = self.connection.graph().execute(q).await?;
        let mut classes = Vec::new();

        while let Some(row) = result.next().await? {
            classes.push(row_to_place_class(row)?);
        }

        Ok(classes)
    }

    async fn save(&self, place_class: &PlaceClass) -> Result<()> {
        let attributes_json = serde_json::to_string(&place_class.attributes)?;

        let q = query(
            "MERGE (c:PlaceClass {code: $code})
            SET c.name = $name,
                c.description = $description,
                c.attributes = $attributes,
                c.demised_place_class_code = $demised_place_class_code
            RETURN c.code as code",
        )
        .param("code", place_class.code.clone())
        .param("name", place_class.name.clone())
        .param(
            "description",
            place_class.description.clone().unwrap_or_default(),
        )
        .param("attributes", attributes_json)
        .param(
            "demised_place_class_code",
            place_class
                .demised_place_class_code
                .clone()
                .unwrap_or_default(),
        );

        self.connection.graph().run(q).await?;
        tracing::debug!("Saved place class: {}", place_class.code);
        Ok(())
    }
}

pub(super) fn row_to_place_class(row: Row) -> Result<PlaceClass> {
    let node: neo4rs::Node = row.get("c")?;
    node_to_place_class(&node)
}

pub(super) fn node_to_place_class(node: &neo4rs::Node) -> Result<PlaceClass> {
    let code: String = node.get("code")?;
    let name: String = node.get("name")?;
    let description: String = node.get("description").unwrap_or_default();
    let attributes_json: String = node.get("attributes").unwrap_or_else(|_| "{}".to_string());
    let demised: String = node.get("demised_place_class_code").unwrap_or_default();

    Ok(PlaceClass {
        code,
        name,
        description: if description.is_empty() {
            None
        } else {
            Some(description)
        },
        attributes: serde_json::from_str(&attributes_json).unwrap_or_default(),
        demised_place_class_code: if demised.is_empty() { None } else { Some(demised) },
    })
}
