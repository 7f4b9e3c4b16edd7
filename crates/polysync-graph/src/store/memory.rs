//! In-memory graph store for tests, with failure injection.

use async_trait::async_trait;
use polysync_core::{EdgeIdentity, NodeKind};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use super::{GraphStore, NodeProps};
use crate::error::GraphError;

#[derive(Default)]
struct State {
    nodes: HashMap<(NodeKind, i64), NodeProps>,
    edges: HashSet<EdgeIdentity>,
    /// Nodes without the source_id marker; invisible to the store interface.
    unmarked_nodes: usize,
    /// Node upserts for these source ids fail with a query error.
    fail_node_ids: HashSet<i64>,
    /// When set, every call fails as if the connection dropped.
    connection_lost: bool,
    creates: usize,
    updates: usize,
}

/// Test double for [`GraphStore`].
#[derive(Default)]
pub(crate) struct MemoryGraph {
    state: Mutex<State>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a per-node failure for the given source ids.
    pub fn fail_node_upserts(&self, ids: impl IntoIterator<Item = i64>) {
        let mut state = self.state.lock().unwrap();
        state.fail_node_ids.extend(ids);
    }

    /// Simulate a lost connection for every subsequent call.
    pub fn drop_connection(&self) {
        self.state.lock().unwrap().connection_lost = true;
    }

    /// Heal all injected failures, modelling a retry against a healthy store.
    pub fn clear_injected_failures(&self) {
        let mut state = self.state.lock().unwrap();
        state.fail_node_ids.clear();
        state.connection_lost = false;
    }

    /// Add graph content this system does not own.
    pub fn add_unmarked_nodes(&self, count: usize) {
        self.state.lock().unwrap().unmarked_nodes += count;
    }

    pub fn node_count(&self) -> usize {
        self.state.lock().unwrap().nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.state.lock().unwrap().edges.len()
    }

    pub fn unmarked_count(&self) -> usize {
        self.state.lock().unwrap().unmarked_nodes
    }

    pub fn has_node(&self, kind: NodeKind, source_id: i64) -> bool {
        self.state.lock().unwrap().nodes.contains_key(&(kind, source_id))
    }

    pub fn has_edge(&self, edge: EdgeIdentity) -> bool {
        self.state.lock().unwrap().edges.contains(&edge)
    }

    pub fn node_prop(&self, kind: NodeKind, source_id: i64, key: &str) -> Option<String> {
        let state = self.state.lock().unwrap();
        state.nodes.get(&(kind, source_id)).and_then(|props| {
            props.iter().find(|(k, _)| *k == key).map(|(_, v)| v.clone())
        })
    }

    /// (creates, updates) seen so far, to assert idempotence.
    pub fn write_counts(&self) -> (usize, usize) {
        let state = self.state.lock().unwrap();
        (state.creates, state.updates)
    }
}

impl State {
    fn check_available(&self) -> Result<(), GraphError> {
        if self.connection_lost {
            Err(GraphError::Unavailable("connection dropped".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_node_failure(&self, source_id: i64) -> Result<(), GraphError> {
        if self.fail_node_ids.contains(&source_id) {
            Err(GraphError::Query(format!("injected failure for {}", source_id)))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn node_exists(&self, kind: NodeKind, source_id: i64) -> Result<bool, GraphError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        Ok(state.nodes.contains_key(&(kind, source_id)))
    }

    async fn create_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        state.check_node_failure(source_id)?;
        if state.nodes.contains_key(&(kind, source_id)) {
            // Mirrors a uniqueness constraint firing on a real store.
            return Err(GraphError::Constraint(format!(
                "node already exists with {} source_id {}",
                kind, source_id
            )));
        }
        state.nodes.insert((kind, source_id), props);
        state.creates += 1;
        Ok(())
    }

    async fn update_node(
        &self,
        kind: NodeKind,
        source_id: i64,
        props: NodeProps,
    ) -> Result<(), GraphError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        state.check_node_failure(source_id)?;
        match state.nodes.get_mut(&(kind, source_id)) {
            Some(existing) => {
                *existing = props;
                state.updates += 1;
                Ok(())
            }
            None => Err(GraphError::Query(format!(
                "no {} node with source_id {}",
                kind, source_id
            ))),
        }
    }

    async fn edge_exists(&self, edge: EdgeIdentity) -> Result<bool, GraphError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        Ok(state.edges.contains(&edge))
    }

    async fn create_edge(&self, edge: EdgeIdentity) -> Result<(), GraphError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        state.edges.insert(edge);
        Ok(())
    }

    async fn delete_marked(&self) -> Result<u64, GraphError> {
        let mut state = self.state.lock().unwrap();
        state.check_available()?;
        let removed = state.nodes.len() as u64;
        state.nodes.clear();
        state.edges.clear();
        Ok(removed)
    }

    async fn marked_counts(&self) -> Result<(u64, u64), GraphError> {
        let state = self.state.lock().unwrap();
        state.check_available()?;
        Ok((state.nodes.len() as u64, state.edges.len() as u64))
    }
}
