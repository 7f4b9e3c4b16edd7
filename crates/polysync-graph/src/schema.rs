//! Graph schema initialization (uniqueness constraints).

use neo4rs::Query;
use tracing::info;

use crate::error::GraphError;
use crate::GraphClient;

/// Cypher statements for schema initialization.
///
/// The constraints back the core invariant: one node per source_id. With
/// match-then-branch upserts they should never fire; if one does, the store
/// reports it and the run records a duplicate violation.
const SCHEMA_STATEMENTS: &[&str] = &[
    "CREATE CONSTRAINT person_source_id IF NOT EXISTS FOR (p:Person) REQUIRE p.source_id IS UNIQUE",
    "CREATE CONSTRAINT post_source_id IF NOT EXISTS FOR (p:Post) REQUIRE p.source_id IS UNIQUE",
];

/// Initialize constraints. Safe to run multiple times (IF NOT EXISTS).
pub async fn initialize_schema(client: &GraphClient) -> Result<(), GraphError> {
    for statement in SCHEMA_STATEMENTS {
        client.execute(Query::new(statement.to_string())).await?;
    }

    info!(statements = SCHEMA_STATEMENTS.len(), "Graph schema initialized");
    Ok(())
}
