// SPDX-License-Identifier: MIT OR Apache-2.0
//! Node library presets.
//!
//! The palette of addable asset types, split by game mode. Entries carry
//! the kind/subkind pair stamped onto nodes created from them.

use gameforge_graph::{GameMode, NodeKind};

/// One addable preset in the library palette.
#[derive(Debug, Clone, Copy)]
pub struct LibraryEntry {
    /// Node category
    pub kind: NodeKind,
    /// Subkind tag stamped onto the created node
    pub subkind: &'static str,
    /// Display label
    pub label: &'static str,
}

/// A named group of presets.
#[derive(Debug, Clone, Copy)]
pub struct LibraryCategory {
    /// Group heading
    pub name: &'static str,
    /// Presets in display order
    pub entries: &'static [LibraryEntry],
}

const fn entry(kind: NodeKind, subkind: &'static str, label: &'static str) -> LibraryEntry {
    LibraryEntry {
        kind,
        subkind,
        label,
    }
}

/// Presets for 2D projects.
pub const LIBRARY_2D: &[LibraryCategory] = &[
    LibraryCategory {
        name: "World & Levels",
        entries: &[
            entry(NodeKind::World, "world", "World Map (2D)"),
            entry(NodeKind::Zone, "level", "Level Layout"),
            entry(NodeKind::Zone, "tilemap", "Tilemap / Grid"),
            entry(NodeKind::Zone, "parallax", "Parallax Background"),
        ],
    },
    LibraryCategory {
        name: "Characters & Sprites",
        entries: &[
            entry(NodeKind::Character, "sprite_sheet", "Sprite Sheet"),
            entry(NodeKind::Character, "portrait", "Dialogue Portrait"),
            entry(NodeKind::Character, "npc", "NPC Sprite"),
            entry(NodeKind::Character, "boss", "Boss Sprite"),
        ],
    },
    LibraryCategory {
        name: "UI & HUD",
        entries: &[
            entry(NodeKind::Ui, "hud", "In-Game HUD"),
            entry(NodeKind::Ui, "menu", "Main Menu"),
            entry(NodeKind::Ui, "inventory", "Inventory Grid"),
        ],
    },
    LibraryCategory {
        name: "Mechanics (2D)",
        entries: &[
            entry(NodeKind::Mechanic, "platforming", "Platforming Logic"),
            entry(NodeKind::Mechanic, "physics", "2D Physics"),
        ],
    },
    LibraryCategory {
        name: "Assets",
        entries: &[
            entry(NodeKind::Prop, "icon", "Item Icon"),
            entry(NodeKind::Prop, "pickup", "Pickup Item"),
        ],
    },
];

/// Presets for 3D projects.
pub const LIBRARY_3D: &[LibraryCategory] = &[
    LibraryCategory {
        name: "World & Environments",
        entries: &[
            entry(NodeKind::World, "world", "World Map (3D)"),
            entry(NodeKind::Zone, "terrain", "Terrain / Heightmap"),
            entry(NodeKind::Zone, "skybox", "Skybox / HDR"),
            entry(NodeKind::Scene, "scene", "3D Environment"),
        ],
    },
    LibraryCategory {
        name: "Characters & Models",
        entries: &[
            entry(NodeKind::Character, "mesh", "Character Mesh"),
            entry(NodeKind::Character, "rig", "Rig / Skeleton"),
            entry(NodeKind::Character, "npc", "NPC Model"),
        ],
    },
    LibraryCategory {
        name: "UI & Interface",
        entries: &[
            entry(NodeKind::Ui, "hud", "Diegetic HUD"),
            entry(NodeKind::Ui, "menu", "3D Menu Scene"),
        ],
    },
    LibraryCategory {
        name: "Mechanics (3D)",
        entries: &[
            entry(NodeKind::Mechanic, "camera", "Camera Controller"),
            entry(NodeKind::Mechanic, "physics", "RigidBody Physics"),
            entry(NodeKind::Mechanic, "navmesh", "NavMesh AI"),
        ],
    },
    LibraryCategory {
        name: "Assets",
        entries: &[
            entry(NodeKind::Prop, "prop", "3D Prop"),
            entry(NodeKind::Prop, "vehicle", "Vehicle Model"),
            entry(NodeKind::Prop, "material", "Texture / Material"),
        ],
    },
];

/// The palette for a game mode.
pub fn library_for(mode: GameMode) -> &'static [LibraryCategory] {
    match mode {
        GameMode::TwoD => LIBRARY_2D,
        GameMode::ThreeD => LIBRARY_3D,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_libraries_differ_by_mode() {
        assert_ne!(
            library_for(GameMode::TwoD)[0].entries[0].label,
            library_for(GameMode::ThreeD)[0].entries[0].label
        );
    }

    #[test]
    fn test_every_entry_has_a_subkind() {
        for library in [LIBRARY_2D, LIBRARY_3D] {
            for category in library {
                assert!(!category.entries.is_empty());
                for entry in category.entries {
                    assert!(!entry.subkind.is_empty());
                    assert!(!entry.label.is_empty());
                }
            }
        }
    }
}
