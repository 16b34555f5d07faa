// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node definitions for the asset graph.

use serde::{Deserialize, Serialize};

/// Unique identifier for a node.
///
/// Ids are plain strings because blueprint providers choose their own
/// (`"n1"`, `"n2"`, ...). Locally created nodes get ids from
/// [`Graph::add_node`](crate::Graph::add_node), which guards against
/// collisions with any externally supplied id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeId(pub String);

impl NodeId {
    /// Create a node id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Semantic category of an asset node.
///
/// This is a closed set; finer-grained tags live in [`Node::subkind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Top-level world or setting
    World,
    /// Region, level or biome inside a world
    Zone,
    /// Individual scene or key art shot
    Scene,
    /// Playable or non-playable character
    Character,
    /// Item, weapon, vehicle or other object
    Prop,
    /// Gameplay mechanic or system diagram
    Mechanic,
    /// Interface screen or HUD element
    Ui,
}

impl NodeKind {
    /// All kinds, in hierarchy order.
    pub const ALL: [NodeKind; 7] = [
        NodeKind::World,
        NodeKind::Zone,
        NodeKind::Scene,
        NodeKind::Character,
        NodeKind::Prop,
        NodeKind::Mechanic,
        NodeKind::Ui,
    ];

    /// Lowercase wire name, matching the blueprint JSON vocabulary.
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::World => "world",
            NodeKind::Zone => "zone",
            NodeKind::Scene => "scene",
            NodeKind::Character => "character",
            NodeKind::Prop => "prop",
            NodeKind::Mechanic => "mechanic",
            NodeKind::Ui => "ui",
        }
    }

    /// Human-readable label.
    pub fn display_name(self) -> &'static str {
        match self {
            NodeKind::World => "World",
            NodeKind::Zone => "Zone",
            NodeKind::Scene => "Scene",
            NodeKind::Character => "Character",
            NodeKind::Prop => "Prop",
            NodeKind::Mechanic => "Mechanic",
            NodeKind::Ui => "Interface",
        }
    }

    /// Layout row for this kind when no subkind rank applies.
    pub fn base_rank(self) -> u32 {
        match self {
            NodeKind::World => 0,
            NodeKind::Zone => 2,
            NodeKind::Scene => 3,
            NodeKind::Character => 4,
            NodeKind::Mechanic | NodeKind::Ui => 5,
            NodeKind::Prop => 6,
        }
    }

    /// Default aspect ratio for generated imagery of this kind.
    pub fn default_aspect_ratio(self) -> &'static str {
        match self {
            NodeKind::World
            | NodeKind::Zone
            | NodeKind::Scene
            | NodeKind::Mechanic
            | NodeKind::Ui => "16:9",
            NodeKind::Character => "3:4",
            NodeKind::Prop => "1:1",
        }
    }

    /// Parse a wire name, falling back to [`NodeKind::Prop`] for anything
    /// unrecognized. Blueprint providers occasionally invent categories;
    /// props are the safest bucket for them.
    pub fn parse_lossy(s: &str) -> Self {
        s.parse().unwrap_or(NodeKind::Prop)
    }
}

impl std::str::FromStr for NodeKind {
    type Err = UnknownKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "world" => Ok(NodeKind::World),
            "zone" => Ok(NodeKind::Zone),
            "scene" => Ok(NodeKind::Scene),
            "character" => Ok(NodeKind::Character),
            "prop" => Ok(NodeKind::Prop),
            "mechanic" => Ok(NodeKind::Mechanic),
            "ui" => Ok(NodeKind::Ui),
            _ => Err(UnknownKind(s.to_owned())),
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for an unrecognized node kind string.
#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown node kind: {0}")]
pub struct UnknownKind(pub String);

/// Generation state of a node's image.
///
/// Transitions only `Draft -> Generating -> Done` on success or
/// `Generating -> Draft` on failure; `Generating` is never skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// No image yet, eligible for generation
    #[default]
    Draft,
    /// A generation call is in flight
    Generating,
    /// Image attached
    Done,
}

/// 2D canvas position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Position {
    /// Create a position.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An asset node in the graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique id within the graph snapshot
    pub id: NodeId,
    /// Semantic category
    pub kind: NodeKind,
    /// Finer-grained tag (e.g. `"protagonist"`, `"tilemap"`); open vocabulary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subkind: Option<String>,
    /// Display label
    pub label: String,
    /// Visual description fed to the asset generator
    #[serde(default)]
    pub description: String,
    /// Generated image as a data URL or remote URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Generation state
    #[serde(default)]
    pub status: GenerationStatus,
    /// Locked nodes are never touched by the generation pipeline
    #[serde(default)]
    pub locked: bool,
    /// Per-node perspective override (e.g. `"Isometric"`, `"Top-Down"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perspective: Option<String>,
    /// Canvas position
    #[serde(default)]
    pub position: Position,
}

impl Node {
    /// Create a draft node with an empty description at the origin.
    pub fn new(id: NodeId, kind: NodeKind, label: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            subkind: None,
            label: label.into(),
            description: String::new(),
            image: None,
            status: GenerationStatus::Draft,
            locked: false,
            perspective: None,
            position: Position::default(),
        }
    }

    /// Set the subkind tag.
    pub fn with_subkind(mut self, subkind: impl Into<String>) -> Self {
        self.subkind = Some(subkind.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Attach an image and mark the node done.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self.status = GenerationStatus::Done;
        self
    }

    /// Set the position.
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// The most specific type tag: subkind when present, else the kind's
    /// wire name. Used for ranking, prompts, context lines and filenames.
    pub fn target_kind(&self) -> &str {
        self.subkind.as_deref().unwrap_or(self.kind.as_str())
    }
}

/// Shallow partial update for a node. `Some` fields overwrite, `None`
/// fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct NodePatch {
    /// New display label
    pub label: Option<String>,
    /// New description
    pub description: Option<String>,
    /// New subkind tag
    pub subkind: Option<String>,
    /// New image reference
    pub image: Option<String>,
    /// New generation status
    pub status: Option<GenerationStatus>,
    /// New lock state
    pub locked: Option<bool>,
    /// New perspective override
    pub perspective: Option<String>,
    /// New canvas position
    pub position: Option<Position>,
}

impl NodePatch {
    /// A patch that only changes the generation status.
    pub fn status(status: GenerationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch attaching a generated image and marking the node done.
    pub fn generated(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            status: Some(GenerationStatus::Done),
            ..Self::default()
        }
    }

    /// Apply this patch onto a node.
    pub(crate) fn apply(self, node: &mut Node) {
        if let Some(label) = self.label {
            node.label = label;
        }
        if let Some(description) = self.description {
            node.description = description;
        }
        if let Some(subkind) = self.subkind {
            node.subkind = Some(subkind);
        }
        if let Some(image) = self.image {
            node.image = Some(image);
        }
        if let Some(status) = self.status {
            node.status = status;
        }
        if let Some(locked) = self.locked {
            node.locked = locked;
        }
        if let Some(perspective) = self.perspective {
            node.perspective = Some(perspective);
        }
        if let Some(position) = self.position {
            node.position = position;
        }
    }
}
