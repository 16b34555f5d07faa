// SPDX-License-Identifier: MIT OR Apache-2.0
//! Rank-based auto layout.
//!
//! Blueprint graphs arrive with no positions. Layout assigns every node a
//! swimlane row from a fixed semantic rank table (world at the top, props
//! at the bottom) and centers each row horizontally. The edge list is
//! accepted for signature symmetry with the rest of the pipeline but the
//! ranking is purely categorical; hierarchy reads top-to-bottom from the
//! rank table, not from edge topology.

use crate::edge::Edge;
use crate::node::Node;

/// Vertical distance between rank rows.
pub const ROW_HEIGHT: f32 = 350.0;
/// Horizontal distance between row members.
pub const COL_WIDTH: f32 = 350.0;
/// Horizontal offset applied to every row center.
pub const CENTER_OFFSET_X: f32 = 250.0;
/// Vertical offset of the top row.
pub const BASE_OFFSET_Y: f32 = 50.0;

/// Sentinel rank below every defined row; unknown vocabulary sinks here.
pub const UNRANKED_RANK: u32 = 7;

/// Layout row for a node: the subkind's rank when the tag is known,
/// otherwise the kind's base rank.
pub fn rank_of(node: &Node) -> u32 {
    node.subkind
        .as_deref()
        .and_then(subkind_rank)
        .unwrap_or_else(|| node.kind.base_rank())
}

/// Fixed rank table over the finer-grained subkind vocabulary.
fn subkind_rank(subkind: &str) -> Option<u32> {
    match subkind {
        "world" => Some(0),
        "faction" => Some(1),
        "zone" | "biome" | "level" | "tilemap" | "terrain" => Some(2),
        "scene" | "key_art" => Some(3),
        "character" | "protagonist" | "npc" | "creature" | "villain" | "sprite_sheet"
        | "mesh" => Some(4),
        "mechanic" | "system" | "ui" | "hud" => Some(5),
        "prop" | "weapon" | "vehicle" => Some(6),
        _ => None,
    }
}

/// Assign positions to every node; all other fields pass through
/// unchanged. Pure and total: an empty input yields an empty output.
///
/// Nodes are bucketed by [`rank_of`] preserving input order, each bucket
/// becomes a horizontally centered row: member `i` of an `n`-wide row
/// sits at `x = -n*W/2 + W/2 + i*W + CENTER_OFFSET_X`, and the row at
/// `y = rank * ROW_HEIGHT + BASE_OFFSET_Y`.
pub fn layout(nodes: Vec<Node>, _edges: &[Edge]) -> Vec<Node> {
    let ranks: Vec<u32> = nodes.iter().map(rank_of).collect();

    let mut positioned = nodes;
    for rank in ranks.iter().copied().collect::<std::collections::BTreeSet<u32>>() {
        let members: Vec<usize> = ranks
            .iter()
            .enumerate()
            .filter(|(_, r)| **r == rank)
            .map(|(i, _)| i)
            .collect();
        let row_width = members.len() as f32 * COL_WIDTH;
        let start_x = -row_width / 2.0 + COL_WIDTH / 2.0 + CENTER_OFFSET_X;
        let y = rank as f32 * ROW_HEIGHT + BASE_OFFSET_Y;
        for (slot, index) in members.into_iter().enumerate() {
            positioned[index].position.x = start_x + slot as f32 * COL_WIDTH;
            positioned[index].position.y = y;
        }
    }
    positioned
}
