//! Neo4j implementation of the graph store seam.

use async_trait::async_trait;
use neo4rs::Query;
use polysync_core::{EdgeIdentity, NodeKind};

use super::{GraphStore, NodeProps};
use crate::client::GraphClient;
use crate::error::GraphError;

/// Build the `SET n.x = $x, ...` clause for a property list.
fn set_clause(props: &NodeProps) -> String {
    props
        .iter()
        .map(|(key, _)| format!("n.{} = ${}", key, key))
        .collect::<Vec<_>>()
        .join(", ")
}

fn bind_props(mut query: Query, props: NodeProps) -> Query {
    for (key, value) in props {
        query = query.param(key, value);
    }
    query
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn node_exists(&self, kind: NodeKind, source_id: i64) -> Result<bool, GraphError> {
        let query = Query::new(format!(
            "MATCH (n:{} {{source_id: $source_id}}) RETURN count(n) AS c",
            kind.label()
        ))
        .param("source_id", source_id);

        let count: i64 = self.query_scalar(query, "c").await?.unwrap_or(0);
        Ok(count > 0)
    }

    async fn create_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError> {
        let query = Query::new(format!(
            "CREATE (n:{} {{source_id: $source_id}}) SET {}",
            kind.label(),
            set_clause(&props)
        ))
        .param("source_id", source_id);

        self.execute(bind_props(query, props)).await
    }

    async fn update_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError> {
        let query = Query::new(format!(
            "MATCH (n:{} {{source_id: $source_id}}) SET {}",
            kind.label(),
            set_clause(&props)
        ))
        .param("source_id", source_id);

        self.execute(bind_props(query, props)).await
    }

    async fn edge_exists(&self, edge: EdgeIdentity) -> Result<bool, GraphError> {
        let (from_kind, from_id, to_kind, to_id) = edge.endpoints();
        let query = Query::new(format!(
            "MATCH (:{} {{source_id: $from_id}})-[r:{}]->(:{} {{source_id: $to_id}})
             RETURN count(r) AS c",
            from_kind.label(),
            edge.rel_type(),
            to_kind.label()
        ))
        .param("from_id", from_id)
        .param("to_id", to_id);

        let count: i64 = self.query_scalar(query, "c").await?.unwrap_or(0);
        Ok(count > 0)
    }

    async fn create_edge(&self, edge: EdgeIdentity) -> Result<(), GraphError> {
        let (from_kind, from_id, to_kind, to_id) = edge.endpoints();
        let query = Query::new(format!(
            "MATCH (a:{} {{source_id: $from_id}}), (b:{} {{source_id: $to_id}})
             CREATE (a)-[:{}]->(b)",
            from_kind.label(),
            to_kind.label(),
            edge.rel_type()
        ))
        .param("from_id", from_id)
        .param("to_id", to_id);

        self.execute(query).await
    }

    async fn delete_marked(&self) -> Result<u64, GraphError> {
        // Count first, then delete: the two statements are not atomic, but a
        // single run owns the store while it executes.
        let count_query = Query::new(
            "MATCH (n) WHERE (n:Person OR n:Post) AND n.source_id IS NOT NULL
             RETURN count(n) AS c"
                .to_string(),
        );
        let count: i64 = self.query_scalar(count_query, "c").await?.unwrap_or(0);

        let delete_query = Query::new(
            "MATCH (n) WHERE (n:Person OR n:Post) AND n.source_id IS NOT NULL
             DETACH DELETE n"
                .to_string(),
        );
        self.execute(delete_query).await?;

        Ok(count as u64)
    }

    async fn marked_counts(&self) -> Result<(u64, u64), GraphError> {
        let node_query = Query::new(
            "MATCH (n) WHERE (n:Person OR n:Post) AND n.source_id IS NOT NULL
             RETURN count(n) AS c"
                .to_string(),
        );
        let edge_query = Query::new(
            "MATCH (a)-[r:AUTHORED|FRIEND_OF]->(b)
             WHERE a.source_id IS NOT NULL AND b.source_id IS NOT NULL
             RETURN count(r) AS c"
                .to_string(),
        );

        let nodes: i64 = self.query_scalar(node_query, "c").await?.unwrap_or(0);
        let edges: i64 = self.query_scalar(edge_query, "c").await?.unwrap_or(0);
        Ok((nodes as u64, edges as u64))
    }
}
