// SPDX-License-Identifier: MIT OR Apache-2.0
//! Shared, mutation-safe access to the asset graph.
//!
//! The graph is the only mutable state shared between user edits and
//! async generation callbacks. [`GraphStore`] wraps it in a lock and
//! stamps every generation batch with a run epoch: replacing the graph
//! (or explicitly invalidating runs) bumps the epoch, after which a stale
//! batch's late callbacks are dropped instead of mutating a model the
//! batch no longer belongs to.

use gameforge_graph::{Edge, Graph, GraphError, Node, NodeId, NodePatch};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Token identifying one generation run against one graph epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunToken(u64);

/// Thread-safe owner of the session's [`Graph`].
#[derive(Debug, Default)]
pub struct GraphStore {
    graph: RwLock<Graph>,
    epoch: AtomicU64,
}

impl GraphStore {
    /// Create a store around an existing graph.
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: RwLock::new(graph),
            epoch: AtomicU64::new(0),
        }
    }

    /// Run a closure with read access to the graph.
    pub fn read<R>(&self, f: impl FnOnce(&Graph) -> R) -> R {
        f(&self.graph.read())
    }

    /// Run a closure with write access to the graph. For user edits;
    /// generation callbacks go through [`update_node_in_run`](Self::update_node_in_run).
    pub fn write<R>(&self, f: impl FnOnce(&mut Graph) -> R) -> R {
        f(&mut self.graph.write())
    }

    /// Clone the node and edge collections as a frozen snapshot.
    ///
    /// Generation batches compute context against this snapshot, so
    /// earlier results in the same batch never leak into later nodes'
    /// context.
    pub fn snapshot(&self) -> (Vec<Node>, Vec<Edge>) {
        let graph = self.graph.read();
        (graph.nodes().cloned().collect(), graph.edges().to_vec())
    }

    /// Stamp a new generation run with the current epoch.
    pub fn begin_run(&self) -> RunToken {
        RunToken(self.epoch.load(Ordering::Acquire))
    }

    /// Whether a run's token is still current.
    pub fn run_is_current(&self, token: RunToken) -> bool {
        self.epoch.load(Ordering::Acquire) == token.0
    }

    /// Orphan every in-flight generation run.
    pub fn invalidate_runs(&self) {
        self.epoch.fetch_add(1, Ordering::AcqRel);
    }

    /// Live shallow-merge update (user edits). Unknown ids are a no-op.
    pub fn update_node(&self, id: &NodeId, patch: NodePatch) {
        self.graph.write().update_node(id, patch);
    }

    /// Update on behalf of a generation run. Applies only while the
    /// token's epoch is current; returns whether the patch landed.
    pub fn update_node_in_run(&self, token: RunToken, id: &NodeId, patch: NodePatch) -> bool {
        // Epoch check and mutation under one write lock, so a concurrent
        // replace cannot slip between them.
        let mut graph = self.graph.write();
        if self.epoch.load(Ordering::Acquire) != token.0 {
            tracing::debug!(node = %id, "dropping update from orphaned generation run");
            return false;
        }
        graph.update_node(id, patch);
        true
    }

    /// Swap in a freshly laid-out graph and orphan all in-flight runs.
    pub fn replace_graph(&self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), GraphError> {
        let mut graph = self.graph.write();
        graph.replace_graph(nodes, edges)?;
        self.epoch.fetch_add(1, Ordering::AcqRel);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gameforge_graph::{GenerationStatus, NodeKind};

    fn store_with(nodes: Vec<Node>) -> GraphStore {
        let mut graph = Graph::new();
        for node in nodes {
            graph.insert_node(node);
        }
        GraphStore::new(graph)
    }

    #[test]
    fn test_run_update_applies_while_current() {
        let store = store_with(vec![Node::new(
            NodeId::from("n1"),
            NodeKind::World,
            "Aeloria",
        )]);
        let token = store.begin_run();
        assert!(store.update_node_in_run(
            token,
            &NodeId::from("n1"),
            NodePatch::status(GenerationStatus::Generating)
        ));
        store.read(|g| {
            assert_eq!(
                g.node(&NodeId::from("n1")).unwrap().status,
                GenerationStatus::Generating
            );
        });
    }

    #[test]
    fn test_stale_run_update_is_dropped() {
        let store = store_with(vec![Node::new(
            NodeId::from("n1"),
            NodeKind::World,
            "Aeloria",
        )]);
        let token = store.begin_run();
        store.invalidate_runs();
        assert!(!store.update_node_in_run(
            token,
            &NodeId::from("n1"),
            NodePatch::generated("img://late")
        ));
        store.read(|g| {
            assert!(g.node(&NodeId::from("n1")).unwrap().image.is_none());
        });
    }

    #[test]
    fn test_replace_graph_orphans_runs() {
        let store = store_with(vec![Node::new(
            NodeId::from("n1"),
            NodeKind::World,
            "Aeloria",
        )]);
        let token = store.begin_run();
        store
            .replace_graph(
                vec![Node::new(NodeId::from("n1"), NodeKind::World, "Aeloria II")],
                Vec::new(),
            )
            .unwrap();
        assert!(!store.run_is_current(token));
        // A late callback from the old batch cannot touch the new graph
        assert!(!store.update_node_in_run(
            token,
            &NodeId::from("n1"),
            NodePatch::generated("img://stale")
        ));
    }

    #[test]
    fn test_failed_replace_keeps_runs_current() {
        let store = store_with(vec![Node::new(
            NodeId::from("n1"),
            NodeKind::World,
            "Aeloria",
        )]);
        let token = store.begin_run();
        let err = store.replace_graph(
            vec![Node::new(NodeId::from("a"), NodeKind::World, "A")],
            vec![Edge::new(
                gameforge_graph::EdgeId::from("e-0"),
                NodeId::from("a"),
                NodeId::from("ghost"),
            )],
        );
        assert!(err.is_err());
        assert!(store.run_is_current(token));
    }
}
