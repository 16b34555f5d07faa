// SPDX-License-Identifier: MIT OR Apache-2.0
//! Edge (dependency) definitions for the asset graph.

use crate::node::NodeId;
use serde::{Deserialize, Serialize};

/// Unique identifier for an edge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub String);

impl EdgeId {
    /// Create an edge id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EdgeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// A directed dependency edge: the target depends on (inherits context
/// from) the source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique edge id
    pub id: EdgeId,
    /// Parent node
    pub source: NodeId,
    /// Child node
    pub target: NodeId,
}

impl Edge {
    /// Create an edge.
    pub fn new(id: EdgeId, source: NodeId, target: NodeId) -> Self {
        Self { id, source, target }
    }

    /// Check whether this edge touches a node.
    pub fn involves(&self, node_id: &NodeId) -> bool {
        self.source == *node_id || self.target == *node_id
    }
}
