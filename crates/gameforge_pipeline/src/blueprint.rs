// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blueprint wire format.
//!
//! Blueprints are JSON produced by an external generator. Ids are chosen
//! by the provider (`"n1"`, `"n2"`, ...) and type names are open strings;
//! conversion into graph nodes happens in [`crate::intake`].

use gameforge_graph::GameMode;
use serde::{Deserialize, Serialize};

/// Structured brief for blueprint and style generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintRequest {
    /// Free-text core concept
    pub concept: String,
    /// Target platform (e.g. `"PC"`, `"Mobile"`)
    pub platform: String,
    /// Camera perspective (e.g. `"3D"`, `"Isometric"`, `"Top-Down"`)
    pub perspective: String,
    /// Genre hint
    #[serde(default)]
    pub genre: String,
    /// Art-style hint
    #[serde(default)]
    pub art_style: String,
    /// Key mechanics hint
    #[serde(default)]
    pub mechanics: String,
    /// Target audience
    #[serde(default)]
    pub audience: String,
    /// Whether assets should read as 2D or 3D
    #[serde(default)]
    pub game_mode: GameMode,
}

/// A candidate asset graph as returned by the blueprint generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blueprint {
    /// Proposed game title
    #[serde(rename = "gameTitle")]
    pub title: String,
    /// Candidate nodes
    pub nodes: Vec<BlueprintNode>,
    /// Candidate edges
    pub edges: Vec<BlueprintEdge>,
}

/// One node in the blueprint wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintNode {
    /// Provider-chosen id
    pub id: String,
    /// Category name; unknown values fall back to `prop` on intake
    #[serde(rename = "type")]
    pub kind: String,
    /// Finer-grained tag
    #[serde(default)]
    pub subtype: Option<String>,
    /// Display label
    pub label: String,
    /// Visual description
    pub description: String,
}

/// One edge in the blueprint wire format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintEdge {
    /// Parent node id
    pub source: String,
    /// Child node id
    pub target: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blueprint_json_shape() {
        let json = r#"{
            "gameTitle": "Skyfall",
            "nodes": [
                {"id": "n1", "type": "world", "subtype": "world",
                 "label": "Aeloria", "description": "A floating kingdom"},
                {"id": "n2", "type": "character", "subtype": "protagonist",
                 "label": "Kael", "description": "A sky pirate"}
            ],
            "edges": [{"source": "n1", "target": "n2"}]
        }"#;
        let bp: Blueprint = serde_json::from_str(json).unwrap();
        assert_eq!(bp.title, "Skyfall");
        assert_eq!(bp.nodes.len(), 2);
        assert_eq!(bp.nodes[1].kind, "character");
        assert_eq!(bp.edges[0].target, "n2");
    }

    #[test]
    fn test_request_defaults() {
        let json = r#"{"concept": "Sky pirates", "platform": "PC", "perspective": "3D"}"#;
        let req: BlueprintRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.game_mode, GameMode::ThreeD);
        assert!(req.genre.is_empty());
    }
}
