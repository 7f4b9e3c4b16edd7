//! Neo4j connection client.

use neo4rs::{ConfigBuilder, Graph, Query};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::GraphError;

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "polysync_dev".to_string(),
        }
    }
}

/// Classify a driver error into the run-level taxonomy.
///
/// Classification is by message: constraint violations carry the Neo4j
/// `ConstraintValidation` code, while transport-level failures mention the
/// connection or the underlying io error.
pub(crate) fn classify(err: neo4rs::Error) -> GraphError {
    let msg = err.to_string();
    let lower = msg.to_lowercase();
    if msg.contains("ConstraintValidation") || msg.contains("already exists with") {
        GraphError::Constraint(msg)
    } else if lower.contains("connection") || lower.contains("os error") || lower.contains("broken pipe") {
        GraphError::Unavailable(msg)
    } else {
        GraphError::Query(msg)
    }
}

/// Client for the Neo4j graph store.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
}

impl GraphClient {
    /// Create a new GraphClient from config.
    ///
    /// neo4rs uses a lazy deadpool: `Graph::connect` only creates the pool
    /// object and does not establish a real bolt connection yet. A cheap
    /// `RETURN 1` ping runs immediately so an unreachable store fails fast
    /// instead of hanging until the first real write.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo4j_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .db("neo4j")
            .max_connections(4) // one run at a time, no need for a big pool
            .fetch_size(200)
            .build()
            .map_err(classify)?;

        let graph = Graph::connect(neo4j_config).await.map_err(classify)?;

        // Force an actual TCP+bolt handshake.
        graph
            .run(Query::new("RETURN 1".to_string()))
            .await
            .map_err(|e| GraphError::Unavailable(e.to_string()))?;

        Ok(Self { graph })
    }

    /// Execute a Cypher statement that returns no results.
    pub async fn execute(&self, query: Query) -> Result<(), GraphError> {
        self.graph.run(query).await.map_err(classify)?;
        Ok(())
    }

    /// Execute a Cypher query and collect all rows.
    pub async fn query(&self, query: Query) -> Result<Vec<neo4rs::Row>, GraphError> {
        let mut result = self.graph.execute(query).await.map_err(classify)?;

        let mut rows = Vec::new();
        while let Some(row) = result.next().await.map_err(classify)? {
            rows.push(row);
        }
        Ok(rows)
    }

    /// Execute a Cypher query and return a single scalar value.
    pub async fn query_scalar<T: DeserializeOwned>(
        &self,
        query: Query,
        field: &str,
    ) -> Result<Option<T>, GraphError> {
        let rows = self.query(query).await?;
        if let Some(row) = rows.into_iter().next() {
            let val: T = row
                .get(field)
                .map_err(|e| GraphError::Query(format!("failed to get field '{}': {:?}", field, e)))?;
            Ok(Some(val))
        } else {
            Ok(None)
        }
    }
}
