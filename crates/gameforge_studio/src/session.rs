// SPDX-License-Identifier: MIT OR Apache-2.0
//! Studio session: the graph store plus the session-level knobs.
//!
//! A session owns the shared [`GraphStore`], the active Style DNA and the
//! game mode, and exposes the operations the editor surface calls:
//! adding library nodes, drafting descriptions, running blueprint intake,
//! regenerating single nodes and exporting.

use gameforge_graph::{GameMode, Graph, Node, NodeId, NodeKind, NodePatch, StyleDna};
use gameforge_pipeline::{
    generate_single, parent_context, run_blueprint_intake, AssetGenerator, AssetSink,
    BlueprintGenerator, BlueprintRequest, DescriptionRequest, ExportReceipt, ExportSnapshot,
    GraphStore, IntakeOutcome, PipelineError, ProviderError, StyleAdapter, TextGenerator,
};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::library::LibraryEntry;

/// Context line handed to the description writer for parentless nodes.
const NO_CONTEXT: &str = "No specific parent context";

/// Error from a session operation.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    /// The operation named a node the graph does not have
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),

    /// The node is locked against generated changes
    #[error("Node is locked: {0}")]
    NodeLocked(NodeId),

    /// A provider call failed
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// Blueprint intake failed
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// One editing session over one project.
pub struct StudioSession {
    store: Arc<GraphStore>,
    style: RwLock<StyleDna>,
    game_mode: RwLock<GameMode>,
}

impl Default for StudioSession {
    fn default() -> Self {
        Self::new()
    }
}

impl StudioSession {
    /// A session seeded with the starter project: a world, a zone and a
    /// protagonist already wired together.
    pub fn new() -> Self {
        let mut graph = Graph::new();
        graph.insert_node(
            Node::new(NodeId::from("1"), NodeKind::World, "The Forgotten Kingdom")
                .with_subkind("world")
                .with_description(
                    "A fallen realm shrouded in eternal twilight, where ancient ruins float \
                     in a gravity-defying void.",
                )
                .with_position(250.0, 50.0),
        );
        graph.insert_node(
            Node::new(NodeId::from("2"), NodeKind::Zone, "Crystal Caverns")
                .with_subkind("zone")
                .with_description("Underground tunnels illuminated by giant, humming crystals.")
                .with_position(100.0, 300.0),
        );
        graph.insert_node(
            Node::new(NodeId::from("3"), NodeKind::Character, "Protagonist")
                .with_subkind("protagonist")
                .with_description("A lone wanderer with a glowing mechanical arm.")
                .with_position(400.0, 300.0),
        );
        // Seed edges mirror the starter hierarchy: world feeds both children
        let _ = graph.connect(&NodeId::from("1"), &NodeId::from("2"));
        let _ = graph.connect(&NodeId::from("1"), &NodeId::from("3"));

        Self {
            store: Arc::new(GraphStore::new(graph)),
            style: RwLock::new(StyleDna::default()),
            game_mode: RwLock::new(GameMode::default()),
        }
    }

    /// Shared handle to the graph store.
    pub fn store(&self) -> Arc<GraphStore> {
        Arc::clone(&self.store)
    }

    /// The active style, cloned.
    pub fn style(&self) -> StyleDna {
        self.style.read().clone()
    }

    /// Replace the active style wholesale. Batches already in flight keep
    /// the style they started with.
    pub fn set_style(&self, style: StyleDna) {
        *self.style.write() = style;
    }

    /// The active game mode.
    pub fn game_mode(&self) -> GameMode {
        *self.game_mode.read()
    }

    /// Switch between 2D and 3D.
    pub fn set_game_mode(&self, mode: GameMode) {
        *self.game_mode.write() = mode;
    }

    /// Add a node from a library preset. Returns the new node's id.
    pub fn add_library_node(&self, entry: &LibraryEntry) -> NodeId {
        let id = self
            .store
            .write(|g| g.add_node(entry.kind, Some(entry.subkind), entry.label));
        tracing::debug!(node = %id, label = entry.label, "library node added");
        id
    }

    /// Draft or enhance a node's description with a text generator,
    /// feeding it the node's upstream context. Locked nodes are refused.
    pub async fn write_description<T: TextGenerator>(
        &self,
        id: &NodeId,
        writer: &T,
    ) -> Result<String, StudioError> {
        let (nodes, edges) = self.store.snapshot();
        let node = nodes
            .iter()
            .find(|n| n.id == *id)
            .ok_or_else(|| StudioError::NodeNotFound(id.clone()))?;
        if node.locked {
            return Err(StudioError::NodeLocked(id.clone()));
        }

        let context = parent_context(id, &nodes, &edges);
        let context = if context.is_empty() {
            NO_CONTEXT
        } else {
            context.as_str()
        };
        let description = writer
            .describe(&DescriptionRequest {
                kind: node.kind,
                subkind: node.subkind.as_deref(),
                label: &node.label,
                context,
                existing: &node.description,
            })
            .await?;

        self.store.update_node(
            id,
            NodePatch {
                description: Some(description.clone()),
                ..NodePatch::default()
            },
        );
        Ok(description)
    }

    /// Run blueprint intake from a brief. On success the session adopts
    /// the batch's style and the request's game mode.
    pub async fn run_blueprint<B, S, G>(
        &self,
        request: &BlueprintRequest,
        blueprints: &B,
        styles: &S,
        assets: &G,
    ) -> Result<IntakeOutcome, StudioError>
    where
        B: BlueprintGenerator,
        S: StyleAdapter,
        G: AssetGenerator,
    {
        let session_style = self.style();
        let outcome =
            run_blueprint_intake(&self.store, request, &session_style, blueprints, styles, assets)
                .await?;
        self.set_style(outcome.style.clone());
        self.set_game_mode(request.game_mode);
        Ok(outcome)
    }

    /// Regenerate a single node against the live graph.
    pub async fn regenerate_node<G: AssetGenerator>(
        &self,
        id: &NodeId,
        generator: &G,
    ) -> Result<(), StudioError> {
        if self.store.read(|g| g.node(id).is_none()) {
            return Err(StudioError::NodeNotFound(id.clone()));
        }
        let token = self.store.begin_run();
        generate_single(
            &self.store,
            token,
            id,
            &self.style(),
            self.game_mode(),
            generator,
        )
        .await;
        Ok(())
    }

    /// Publish every generated asset plus the metadata document.
    pub async fn export<S: AssetSink>(&self, sink: &S) -> Result<ExportReceipt, StudioError> {
        let snapshot = self
            .store
            .read(|g| ExportSnapshot::collect(g, self.game_mode(), &self.style()));
        Ok(snapshot.publish(sink).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::library_for;
    use crate::providers::{
        CannedBlueprint, KeepSessionStyle, PlaceholderAssets, StaticWriter,
    };
    use gameforge_graph::{GenerationStatus, NodeKind};

    fn brief() -> BlueprintRequest {
        BlueprintRequest {
            concept: "A dying forge-world".to_owned(),
            platform: "PC".to_owned(),
            perspective: "3D".to_owned(),
            genre: "Action RPG".to_owned(),
            art_style: String::new(),
            mechanics: String::new(),
            audience: String::new(),
            game_mode: GameMode::ThreeD,
        }
    }

    #[test]
    fn test_starter_project_shape() {
        let session = StudioSession::new();
        session.store().read(|g| {
            assert_eq!(g.node_count(), 3);
            assert_eq!(g.edge_count(), 2);
            let world = g.node(&NodeId::from("1")).unwrap();
            assert_eq!(world.kind, NodeKind::World);
            assert_eq!(world.status, GenerationStatus::Draft);
            // Both starter children hang off the world
            assert_eq!(g.children_of(&NodeId::from("1")).len(), 2);
        });
    }

    #[test]
    fn test_add_library_node() {
        let session = StudioSession::new();
        let entry = &library_for(GameMode::ThreeD)[0].entries[1];
        let id = session.add_library_node(entry);
        session.store().read(|g| {
            let node = g.node(&id).unwrap();
            assert_eq!(node.subkind.as_deref(), Some("terrain"));
            assert_eq!(node.label, "Terrain / Heightmap");
        });
    }

    #[tokio::test]
    async fn test_write_description_feeds_parent_context() {
        let session = StudioSession::new();
        let description = session
            .write_description(&NodeId::from("2"), &StaticWriter)
            .await
            .unwrap();
        assert!(description.contains("The Forgotten Kingdom"));
        session.store().read(|g| {
            assert_eq!(g.node(&NodeId::from("2")).unwrap().description, description);
        });
    }

    #[tokio::test]
    async fn test_write_description_refuses_locked() {
        let session = StudioSession::new();
        session.store().update_node(
            &NodeId::from("3"),
            NodePatch {
                locked: Some(true),
                ..NodePatch::default()
            },
        );
        let err = session
            .write_description(&NodeId::from("3"), &StaticWriter)
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::NodeLocked(_)));
    }

    #[tokio::test]
    async fn test_run_blueprint_replaces_starter_project() {
        let session = StudioSession::new();
        let outcome = session
            .run_blueprint(
                &brief(),
                &CannedBlueprint::demo(),
                &KeepSessionStyle,
                &PlaceholderAssets::new(),
            )
            .await
            .unwrap();
        assert_eq!(outcome.title, "Emberfall");
        session.store().read(|g| {
            assert_eq!(g.node_count(), outcome.node_count);
            assert!(g.node(&NodeId::from("1")).is_none(), "starter graph replaced");
            for node in g.nodes() {
                assert_eq!(node.status, GenerationStatus::Done);
                assert!(node.image.is_some());
            }
        });
    }

    #[tokio::test]
    async fn test_regenerate_node() {
        let session = StudioSession::new();
        session
            .regenerate_node(&NodeId::from("3"), &PlaceholderAssets::new())
            .await
            .unwrap();
        session.store().read(|g| {
            assert_eq!(
                g.node(&NodeId::from("3")).unwrap().status,
                GenerationStatus::Done
            );
        });

        let err = session
            .regenerate_node(&NodeId::from("ghost"), &PlaceholderAssets::new())
            .await
            .unwrap_err();
        assert!(matches!(err, StudioError::NodeNotFound(_)));
    }
}
