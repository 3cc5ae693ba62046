//! Neo4j graph store.

use async_trait::async_trait;
use neo4rs::{ConfigBuilder, Graph};

use collabgraph_core::graph::{
    CollaborationRecord, GraphNode, GraphStore, OutgoingRelation, Result,
};
use collabgraph_core::research::RelationKind;

use super::cypher::{self, Statement};
use super::error::{map_connect_error, map_query_error, map_row_error};

/// Connection settings for Neo4j.
#[derive(Debug, Clone)]
pub struct Neo4jSettings {
    pub uri: String,
    pub username: String,
    pub password: String,
    pub database: String,
}

/// Neo4j-backed graph store.
///
/// `Graph` pools its own connections and is cheap to clone.
#[derive(Clone)]
pub struct Neo4jGraph {
    graph: Graph,
}

impl Neo4jGraph {
    /// Connects and verifies the server answers.
    pub async fn connect(settings: &Neo4jSettings) -> Result<Self> {
        let config = ConfigBuilder::default()
            .uri(settings.uri.as_str())
            .user(settings.username.as_str())
            .password(settings.password.as_str())
            .db(settings.database.as_str())
            .build()
            .map_err(map_connect_error)?;
        let graph = Graph::connect(config).await.map_err(map_connect_error)?;

        let store = Self { graph };
        store.ping().await?;
        Ok(store)
    }

    async fn run(&self, statement: Statement) -> Result<()> {
        self.graph
            .run(statement.into_query())
            .await
            .map_err(map_query_error)
    }

    async fn rows(&self, statement: Statement) -> Result<Vec<neo4rs::Row>> {
        let mut stream = self
            .graph
            .execute(statement.into_query())
            .await
            .map_err(map_query_error)?;

        let mut rows = Vec::new();
        while let Some(row) = stream.next().await.map_err(map_query_error)? {
            rows.push(row);
        }
        Ok(rows)
    }
}

fn text_column(row: &neo4rs::Row, column: &str) -> Result<String> {
    row.get::<String>(column)
        .map_err(|e| map_row_error(column, e))
}

#[async_trait]
impl GraphStore for Neo4jGraph {
    async fn upsert_node(&self, node: &GraphNode) -> Result<()> {
        self.run(cypher::merge_node(node)).await
    }

    async fn upsert_edge(
        &self,
        researcher_name: &str,
        relation: RelationKind,
        target: &GraphNode,
    ) -> Result<()> {
        self.run(cypher::merge_edge(researcher_name, relation, target))
            .await
    }

    async fn outgoing_relations(&self, researcher_name: &str) -> Result<Vec<OutgoingRelation>> {
        let rows = self.rows(cypher::outgoing_relations(researcher_name)).await?;

        rows.iter()
            .map(|row| {
                Ok(OutgoingRelation {
                    relation: text_column(row, "relation")?,
                    target: row.get::<String>("target").ok(),
                })
            })
            .collect()
    }

    async fn list_collaborations(&self, limit: usize) -> Result<Vec<CollaborationRecord>> {
        let rows = self.rows(cypher::list_collaborations(limit)).await?;

        rows.iter()
            .map(|row| {
                Ok(CollaborationRecord {
                    researcher: text_column(row, "researcher")?,
                    relation: text_column(row, "relation")?,
                    target: row.get::<String>("target").ok(),
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<()> {
        self.rows(Statement {
            text: "RETURN 1 AS ok".to_string(),
            params: Vec::new(),
        })
        .await
        .map(|_| ())
    }
}
