//! Place repository implementation for Neo4j
//!
//! A place is one node owning its attrs and exits as JSON properties, so
//! one `save` call writes the place and everything it owns atomically.
//! The class lives on its own node behind an OF_CLASS relationship.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use neo4rs::{query, Row};
use serde::{Deserialize, Serialize};

use super::connection::Neo4jConnection;
use super::place_class_repository::node_to_place_class;
use crate::application::ports::outbound::PlaceRepositoryPort;
use crate::domain::entities::{Place, PlaceAttr, PlaceExit};
use crate::domain::value_objects::{Direction, PlaceId};

/// Repository for Place operations
pub struct Neo4jPlaceRepository {
    connection: Neo4jConnection,
}

impl Neo4jPlaceRepository {
    pub fn new(connection: Neo4jConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl PlaceRepositoryPort for Neo4jPlaceRepository {
    async fn get(&self, id: PlaceId) -> Result<Option<Place>> {
        let q = query(
            "MATCH (p:Place {id: $id})-[:OF_CLASS]->(c:PlaceClass)
            RETURN p, c",
        )
        .param("id", id.to_string());

        let mut result = self.connection.graph().execute(q).await?;

        if let Some(row) = result.next().await? {
            Ok(Some(row_to_place(row)?))
        } else {
            Ok(None)
        }
    }

    async fn save(&self, place: &Place) -> Result<()> {
        let attrs_json = serde_json::to_string(
            &place
                .attrs
                .iter()
                .cloned()
                .map(AttrStored::from)
                .collect::<Vec<_>>(),
        )?;
        let exits_json = serde_json::to_string(
            &place
                .exits
                .iter()
                .cloned()
                .map(ExitStored::from)
                .collect::<Vec<_>>(),
        )?;

        // Re-point OF_CLASS in the same statement so a class change and
        // the place update commit together
        let q = query(
            "MATCH (c:PlaceClass {code: $class_code})
            MERGE (p:Place {id: $id})
            SET p.name = $name,
                p.attrs = $attrs,
                p.exits = $exits
            WITH p, c
            OPTIONAL MATCH (p)-[old:OF_CLASS]->(:PlaceClass)
            DELETE old
            MERGE (p)-[:OF_CLASS]->(c)
            RETURN p.id as id",
        )
        .param("id", place.id.to_string())
        .param("class_code", place.place_class.code.clone())
        .param("name", place.name.clone().unwrap_or_default())
        .param("attrs", attrs_json)
        .param("exits", exits_json);

        self.connection.graph().run(q).await?;
        tracing::debug!("Saved place: {}", place.id);
        Ok(())
    }

    async fn delete(&self, id: PlaceId) -> Result<()> {
        let q = query(
            "MATCH (p:Place {id: $id})
            DETACH DELETE p",
        )
        .param("id", id.to_string());

        self.connection.graph().run(q).await?;
        tracing::debug!("Deleted place: {}", id);
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AttrStored {
    code: String,
    value: i32,
}

impl From<PlaceAttr> for AttrStored {
    fn from(attr: PlaceAttr) -> Self {
        Self {
            code: attr.code,
            value: attr.value,
        }
    }
}

impl From<AttrStored> for PlaceAttr {
    fn from(stored: AttrStored) -> Self {
        PlaceAttr::new(stored.code, stored.value)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ExitStored {
    direction: Direction,
    target_place: String,
    visible: bool,
    opened: bool,
    locked: bool,
}

impl From<PlaceExit> for ExitStored {
    fn from(exit: PlaceExit) -> Self {
        Self {
            direction: exit.direction,
            target_place: exit.target_place.to_string(),
            visible: exit.visible,
            opened: exit.opened,
            locked: exit.locked,
        }
    }
}

impl TryFrom<ExitStored> for PlaceExit {
    type Error = anyhow::Error;

    fn try_from(stored: ExitStored) -> Result<Self> {
        Ok(PlaceExit {
            direction: stored.direction,
            target_place: PlaceId::from_uuid(uuid::Uuid::parse_str(&stored.target_place)?),
            visible: stored.visible,
            opened: stored.opened,
            locked: stored.locked,
        })
    }
}

fn row_to_place(row: Row) -> Result<Place> {
    let place_node: neo4rs::Node = row.get("p")?;
    let class_node: neo4rs::Node = row.get("c")?;

    let id_str: String = place_node.get("id")?;
    let name: String = place_node.get("name").unwrap_or_default();
    let attrs_json: String = place_node.get("attrs").unwrap_or_else(|_| "[]".to_string());
    let exits_json: String = place_node.get("exits").unwrap_or_else(|_| "[]".to_string());

    let attrs: Vec<PlaceAttr> = serde_json::from_str::<Vec<AttrStored>>(&attrs_json)
        .map_err(|e| anyhow!("Corrupt attrs on place {id_str}: {e}"))?
        .into_iter()
        .map(Into::into)
        .collect();

    let exits: Vec<PlaceExit> = serde_json::from_str::<Vec<ExitStored>>(&exits_json)
        .map_err(|e| anyhow!("Corrupt exits on place {id_str}: {e}"))?
        .into_iter()
        .map(PlaceExit::try_from)
        .collect::<Result<Vec<_>>>()?;

    Ok(Place {
        id: PlaceId::from_uuid(uuid::Uuid::parse_str(&id_str)?),
        name: if name.is_empty() { None } else { Some(name) },
        place_class: node_to_place_class(&class_node)?,
        attrs,
        exits,
    })
}
