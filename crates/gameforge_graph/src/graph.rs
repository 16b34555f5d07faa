// SPDX-License-Identifier: MIT OR Apache-2.0
//! Graph data structure owning the node and edge collections.

use crate::edge::{Edge, EdgeId};
use crate::node::{Node, NodeId, NodeKind, NodePatch, Position};
use indexmap::IndexMap;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Default drop zone for freshly added nodes, jittered so stacked
/// additions stay individually grabbable on the canvas.
const SPAWN_X: f32 = 100.0;
const SPAWN_Y: f32 = 200.0;
const SPAWN_JITTER: f32 = 50.0;

/// The asset graph: id-addressed nodes plus an ordered edge list.
///
/// Iteration order is load-bearing: nodes iterate in insertion order
/// (generation batches walk them exactly in that order) and
/// [`parents_of`](Graph::parents_of) answers in edge-array order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Graph {
    nodes: IndexMap<NodeId, Node>,
    edges: Vec<Edge>,
    /// Monotonic counter feeding locally allocated ids
    #[serde(default)]
    next_local: u64,
}

impl Graph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with a fresh locally allocated id, placed at a jittered
    /// default position with status `Draft`. Returns the new id.
    ///
    /// Local ids combine the monotonic counter with a randomized suffix
    /// because blueprint providers supply their own ids (`"n1"`, ...) that
    /// a bare counter could collide with; the loop re-rolls on the
    /// (unlikely) remaining collisions.
    pub fn add_node(
        &mut self,
        kind: NodeKind,
        subkind: Option<&str>,
        label: impl Into<String>,
    ) -> NodeId {
        let id = self.alloc_node_id();
        let mut rng = rand::thread_rng();
        let mut node = Node::new(id.clone(), kind, label).with_position(
            SPAWN_X + rng.gen::<f32>() * SPAWN_JITTER,
            SPAWN_Y + rng.gen::<f32>() * SPAWN_JITTER,
        );
        if let Some(subkind) = subkind {
            node.subkind = Some(subkind.to_owned());
        }
        self.nodes.insert(id.clone(), node);
        id
    }

    fn alloc_node_id(&mut self) -> NodeId {
        loop {
            self.next_local += 1;
            let suffix: u16 = rand::thread_rng().gen();
            let id = NodeId::new(format!("local-{}-{:04x}", self.next_local, suffix));
            if !self.nodes.contains_key(&id) {
                return id;
            }
        }
    }

    /// Insert a fully built node, replacing any node with the same id.
    pub fn insert_node(&mut self, node: Node) -> NodeId {
        let id = node.id.clone();
        self.nodes.insert(id.clone(), node);
        id
    }

    /// Shallow-merge a patch into a node. Unknown ids are a silent no-op:
    /// generation callbacks can race user edits and graph replacement, and
    /// a late update for a vanished node must not blow up the session.
    pub fn update_node(&mut self, id: &NodeId, patch: NodePatch) {
        if let Some(node) = self.nodes.get_mut(id) {
            patch.apply(node);
        }
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(id);
        if removed.is_some() {
            self.edges.retain(|e| !e.involves(id));
        }
        removed
    }

    /// Get a node by id.
    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// All edges in array order.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Atomically swap in a whole new node/edge collection, as produced by
    /// blueprint intake after layout. Rejects duplicate node ids and edges
    /// whose endpoints are missing from the new snapshot; nothing is
    /// installed on error.
    pub fn replace_graph(&mut self, nodes: Vec<Node>, edges: Vec<Edge>) -> Result<(), GraphError> {
        let mut map = IndexMap::with_capacity(nodes.len());
        for node in nodes {
            if map.contains_key(&node.id) {
                return Err(GraphError::DuplicateNodeId(node.id));
            }
            map.insert(node.id.clone(), node);
        }
        for edge in &edges {
            for endpoint in [&edge.source, &edge.target] {
                if !map.contains_key(endpoint) {
                    return Err(GraphError::DanglingEdge {
                        edge: edge.id.clone(),
                        node: endpoint.clone(),
                    });
                }
            }
        }
        self.nodes = map;
        self.edges = edges;
        Ok(())
    }

    /// Append a dependency edge. Both endpoints must exist; cycles and
    /// duplicate edges are deliberately allowed (`parents_of` is a filter,
    /// not a traversal, so cycles cannot loop it).
    pub fn connect(&mut self, source: &NodeId, target: &NodeId) -> Result<EdgeId, GraphError> {
        for endpoint in [source, target] {
            if !self.nodes.contains_key(endpoint) {
                return Err(GraphError::NodeNotFound(endpoint.clone()));
            }
        }
        let id = EdgeId::new(format!("e-{}", self.edges.len()));
        self.edges
            .push(Edge::new(id.clone(), source.clone(), target.clone()));
        Ok(id)
    }

    /// Parent nodes of `id` (edge sources targeting it), in edge-array
    /// order; duplicate edges yield each parent once.
    pub fn parents_of(&self, id: &NodeId) -> Vec<&Node> {
        parents_in(id, &self.nodes, &self.edges)
    }

    /// Child nodes of `id` (edge targets sourced from it), in edge-array
    /// order; duplicates collapsed.
    pub fn children_of(&self, id: &NodeId) -> Vec<&Node> {
        let mut seen: Vec<&NodeId> = Vec::new();
        let mut children = Vec::new();
        for edge in self.edges.iter().filter(|e| e.source == *id) {
            if seen.contains(&&edge.target) {
                continue;
            }
            if let Some(node) = self.nodes.get(&edge.target) {
                seen.push(&edge.target);
                children.push(node);
            }
        }
        children
    }

    /// Move a node on the canvas.
    pub fn set_position(&mut self, id: &NodeId, position: Position) {
        self.update_node(
            id,
            NodePatch {
                position: Some(position),
                ..NodePatch::default()
            },
        );
    }
}

fn parents_in<'a>(
    id: &NodeId,
    nodes: &'a IndexMap<NodeId, Node>,
    edges: &[Edge],
) -> Vec<&'a Node> {
    let mut seen: Vec<&NodeId> = Vec::new();
    let mut parents = Vec::new();
    for edge in edges.iter().filter(|e| e.target == *id) {
        if seen.contains(&&edge.source) {
            continue;
        }
        if let Some(node) = nodes.get(&edge.source) {
            seen.push(&edge.source);
            parents.push(node);
        }
    }
    parents
}

/// Error mutating the graph.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GraphError {
    /// A node id appeared twice in a replacement snapshot
    #[error("Duplicate node id: {0}")]
    DuplicateNodeId(NodeId),

    /// An edge references a node missing from the snapshot
    #[error("Edge {edge} references missing node {node}")]
    DanglingEdge {
        /// The offending edge
        edge: EdgeId,
        /// The missing endpoint
        node: NodeId,
    },

    /// A referenced node does not exist
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
}
