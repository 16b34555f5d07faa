// SPDX-License-Identifier: MIT OR Apache-2.0
//! Asset graph model for GameForge.
//!
//! This crate provides the data layer for the pre-production asset graph:
//! - Nodes tagged with semantic categories (world, zone, character, ...)
//! - Directed dependency edges carrying generation context
//! - The Style DNA descriptor driving art direction
//! - Rank-based auto layout for blueprint-produced graphs
//!
//! ## Architecture
//!
//! Everything here is synchronous and side-effect free; the generation
//! pipeline (`gameforge_pipeline`) layers async orchestration on top.

pub mod edge;
pub mod graph;
pub mod layout;
pub mod node;
pub mod style;

pub use edge::{Edge, EdgeId};
pub use graph::{Graph, GraphError};
pub use layout::{layout, rank_of, UNRANKED_RANK};
pub use node::{GenerationStatus, Node, NodeId, NodeKind, NodePatch, Position};
pub use style::{GameMode, StyleDna};
