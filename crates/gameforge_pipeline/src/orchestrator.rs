// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sequential, context-aware asset generation.
//!
//! The orchestrator walks a frozen graph snapshot in input order and
//! generates one image at a time: at most one provider call is ever in
//! flight, both to respect rate-limited services and to keep context
//! assembly deterministic relative to in-flight mutations. Per-node
//! failures are isolated; a bad node reverts to draft and the batch
//! moves on.

use gameforge_graph::{Edge, GameMode, GenerationStatus, Node, NodeId, NodePatch, StyleDna};

use crate::provider::{AssetGenerator, AssetRequest};
use crate::store::{GraphStore, RunToken};

/// Separator between upstream context lines.
const CONTEXT_JOIN: &str = "\nContext: ";

/// Format the upstream context for a node against a frozen snapshot.
///
/// Parents are the sources of edges targeting the node, in edge-array
/// order, each rendered as `<target-kind> "<label>": <description>`;
/// multiple parents are joined with a literal `"\nContext: "`. Empty when
/// the node has no parents.
pub fn parent_context(node_id: &NodeId, nodes: &[Node], edges: &[Edge]) -> String {
    let mut seen: Vec<&str> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    for edge in edges.iter().filter(|e| e.target == *node_id) {
        if seen.contains(&edge.source.as_str()) {
            continue;
        }
        if let Some(parent) = nodes.iter().find(|n| n.id == edge.source) {
            seen.push(edge.source.as_str());
            lines.push(format!(
                "{} \"{}\": {}",
                parent.target_kind(),
                parent.label,
                parent.description
            ));
        }
    }
    lines.join(CONTEXT_JOIN)
}

/// Whether the orchestrator may generate for this node at all.
///
/// A node with no description has nothing to render; a locked node must
/// never be touched. Either condition skips the node with no state
/// change and no provider call.
fn eligible(node: &Node) -> bool {
    !node.description.is_empty() && !node.locked
}

/// Walk the snapshot sequentially and generate an image per eligible
/// node, writing results into the store as they arrive.
///
/// The snapshot (`nodes`/`edges`) is the authority for iteration order,
/// skip decisions and context; the live graph only receives result
/// patches. `style` is frozen for the whole batch: mid-batch style edits
/// affect neither dispatched nor remaining calls. A node flips to
/// `Generating` before its provider call so the in-flight state is
/// observable, then to `Done` with its image, or back to `Draft` on an
/// empty result or an error. Errors are logged and isolated; the batch
/// always proceeds to the next node. If the run's token goes stale the
/// batch stops and no further patches land.
pub async fn run_sequential_generation<G: AssetGenerator>(
    store: &GraphStore,
    token: RunToken,
    nodes: &[Node],
    edges: &[Edge],
    style: &StyleDna,
    game_mode: GameMode,
    generator: &G,
) {
    for node in nodes {
        if !eligible(node) {
            continue;
        }
        if !store.update_node_in_run(token, &node.id, NodePatch::status(GenerationStatus::Generating))
        {
            tracing::info!("generation batch orphaned, stopping");
            return;
        }

        let context = parent_context(&node.id, nodes, edges);
        let request = AssetRequest {
            description: &node.description,
            style,
            kind: node.kind,
            subkind: node.subkind.as_deref(),
            context: &context,
            game_mode,
            perspective: node.perspective.as_deref(),
        };

        let patch = match generator.generate(&request).await {
            Ok(Some(image)) if !image.is_empty() => {
                tracing::debug!(node = %node.id, "asset generated");
                NodePatch::generated(image)
            }
            Ok(_) => {
                // Soft failure: the provider answered but produced nothing
                tracing::debug!(node = %node.id, "generator returned no image");
                NodePatch::status(GenerationStatus::Draft)
            }
            Err(error) => {
                tracing::warn!(node = %node.id, %error, "asset generation failed");
                NodePatch::status(GenerationStatus::Draft)
            }
        };
        if !store.update_node_in_run(token, &node.id, patch) {
            tracing::info!("generation batch orphaned, stopping");
            return;
        }
    }
}

/// Generate a single node on demand against the live graph (the manual
/// "regenerate" path). Same eligibility, status and failure semantics as
/// the batch walk.
pub async fn generate_single<G: AssetGenerator>(
    store: &GraphStore,
    token: RunToken,
    node_id: &NodeId,
    style: &StyleDna,
    game_mode: GameMode,
    generator: &G,
) {
    let (nodes, edges) = store.snapshot();
    let Some(node) = nodes.iter().find(|n| n.id == *node_id) else {
        return;
    };
    run_sequential_generation(
        store,
        token,
        std::slice::from_ref(node),
        &edges,
        style,
        game_mode,
        generator,
    )
    .await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ProviderError;
    use gameforge_graph::{EdgeId, Graph, NodeKind};
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Scripted generator recording every call it receives.
    #[derive(Default)]
    struct ScriptedGenerator {
        /// Per-description outcomes; unscripted descriptions succeed
        script: HashMap<String, Outcome>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    enum Outcome {
        Image(String),
        Empty,
        Error,
    }

    struct RecordedCall {
        description: String,
        context: String,
    }

    impl ScriptedGenerator {
        fn with(mut self, description: &str, outcome: Outcome) -> Self {
            self.script.insert(description.to_owned(), outcome);
            self
        }

        fn call_count(&self) -> usize {
            self.calls.lock().len()
        }
    }

    impl AssetGenerator for ScriptedGenerator {
        async fn generate(
            &self,
            request: &AssetRequest<'_>,
        ) -> Result<Option<String>, ProviderError> {
            self.calls.lock().push(RecordedCall {
                description: request.description.to_owned(),
                context: request.context.to_owned(),
            });
            match self.script.get(request.description) {
                Some(Outcome::Image(url)) => Ok(Some(url.clone())),
                Some(Outcome::Empty) => Ok(None),
                Some(Outcome::Error) => {
                    Err(ProviderError::Unavailable("scripted failure".to_owned()))
                }
                None => Ok(Some(format!("img://{}", request.description))),
            }
        }
    }

    fn node(id: &str, kind: NodeKind, description: &str) -> Node {
        Node::new(NodeId::from(id), kind, id).with_description(description)
    }

    fn store_of(nodes: &[Node], edges: &[Edge]) -> GraphStore {
        let mut graph = Graph::new();
        for n in nodes {
            graph.insert_node(n.clone());
        }
        let store = GraphStore::new(graph);
        store.write(|g| {
            for e in edges {
                g.connect(&e.source, &e.target).unwrap();
            }
        });
        store
    }

    fn status_of(store: &GraphStore, id: &str) -> GenerationStatus {
        store.read(|g| g.node(&NodeId::from(id)).unwrap().status)
    }

    #[tokio::test]
    async fn test_end_to_end_single_node() {
        let nodes = vec![node("n1", NodeKind::World, "A floating kingdom")];
        let store = store_of(&nodes, &[]);
        let generator =
            ScriptedGenerator::default().with("A floating kingdom", Outcome::Image("img://1".to_owned()));
        let token = store.begin_run();
        let style = StyleDna::default();

        run_sequential_generation(&store, token, &nodes, &[], &style, GameMode::ThreeD, &generator)
            .await;

        assert_eq!(generator.call_count(), 1);
        assert_eq!(generator.calls.lock()[0].context, "");
        store.read(|g| {
            let n = g.node(&NodeId::from("n1")).unwrap();
            assert_eq!(n.status, GenerationStatus::Done);
            assert_eq!(n.image.as_deref(), Some("img://1"));
        });
    }

    #[tokio::test]
    async fn test_skip_empty_description_and_locked() {
        let mut locked = node("locked", NodeKind::Prop, "A cursed idol");
        locked.locked = true;
        let nodes = vec![node("empty", NodeKind::Prop, ""), locked];
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default();
        let token = store.begin_run();

        run_sequential_generation(
            &store,
            token,
            &nodes,
            &[],
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        assert_eq!(generator.call_count(), 0);
        // No state change at all for skipped nodes
        assert_eq!(status_of(&store, "empty"), GenerationStatus::Draft);
        assert_eq!(status_of(&store, "locked"), GenerationStatus::Draft);
    }

    #[tokio::test]
    async fn test_all_locked_rerun_is_idempotent() {
        let mut nodes = vec![
            node("a", NodeKind::World, "A"),
            node("b", NodeKind::Zone, "B"),
        ];
        for n in &mut nodes {
            n.locked = true;
        }
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default();
        let token = store.begin_run();
        let style = StyleDna::default();

        run_sequential_generation(&store, token, &nodes, &[], &style, GameMode::ThreeD, &generator)
            .await;
        run_sequential_generation(&store, token, &nodes, &[], &style, GameMode::ThreeD, &generator)
            .await;

        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn test_failure_isolation() {
        let nodes = vec![
            node("a", NodeKind::World, "A"),
            node("b", NodeKind::Zone, "B"),
            node("c", NodeKind::Character, "C"),
        ];
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default().with("B", Outcome::Error);
        let token = store.begin_run();

        run_sequential_generation(
            &store,
            token,
            &nodes,
            &[],
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        // B alone reverts to draft; its neighbors complete
        assert_eq!(generator.call_count(), 3);
        assert_eq!(status_of(&store, "a"), GenerationStatus::Done);
        assert_eq!(status_of(&store, "b"), GenerationStatus::Draft);
        assert_eq!(status_of(&store, "c"), GenerationStatus::Done);
    }

    #[tokio::test]
    async fn test_empty_result_is_soft_failure() {
        let nodes = vec![node("a", NodeKind::Prop, "A rusted key")];
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default().with("A rusted key", Outcome::Empty);
        let token = store.begin_run();

        run_sequential_generation(
            &store,
            token,
            &nodes,
            &[],
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        assert_eq!(status_of(&store, "a"), GenerationStatus::Draft);
        store.read(|g| assert!(g.node(&NodeId::from("a")).unwrap().image.is_none()));
    }

    #[tokio::test]
    async fn test_context_from_snapshot_not_live_graph() {
        let parent = node("world", NodeKind::World, "A floating kingdom")
            .with_subkind("world");
        let child = node("zone", NodeKind::Zone, "Underground crystal tunnels");
        let edges = vec![Edge::new(
            EdgeId::from("e-0"),
            NodeId::from("world"),
            NodeId::from("zone"),
        )];
        let nodes = vec![parent, child];
        let store = store_of(&nodes, &edges);

        // A concurrent user edit mutates the live parent after the
        // snapshot was taken
        store.update_node(
            &NodeId::from("world"),
            NodePatch {
                description: Some("REWRITTEN".to_owned()),
                ..NodePatch::default()
            },
        );

        let generator = ScriptedGenerator::default();
        let token = store.begin_run();
        run_sequential_generation(
            &store,
            token,
            &nodes,
            &edges,
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        let calls = generator.calls.lock();
        let zone_call = calls
            .iter()
            .find(|c| c.description == "Underground crystal tunnels")
            .unwrap();
        assert_eq!(zone_call.context, "world \"world\": A floating kingdom");
    }

    #[tokio::test]
    async fn test_multi_parent_context_join() {
        let nodes = vec![
            node("w", NodeKind::World, "The overworld").with_subkind("world"),
            node("f", NodeKind::World, "The iron pact").with_subkind("faction"),
            node("c", NodeKind::Character, "A turncoat knight"),
        ];
        let edges = vec![
            Edge::new(EdgeId::from("e-0"), NodeId::from("w"), NodeId::from("c")),
            Edge::new(EdgeId::from("e-1"), NodeId::from("f"), NodeId::from("c")),
        ];
        let context = parent_context(&NodeId::from("c"), &nodes, &edges);
        assert_eq!(
            context,
            "world \"w\": The overworld\nContext: faction \"f\": The iron pact"
        );
        // Deterministic on repeated calls
        assert_eq!(context, parent_context(&NodeId::from("c"), &nodes, &edges));
    }

    #[tokio::test]
    async fn test_orphaned_run_stops_without_calls() {
        let nodes = vec![node("a", NodeKind::World, "A")];
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default();
        let token = store.begin_run();
        store.invalidate_runs();

        run_sequential_generation(
            &store,
            token,
            &nodes,
            &[],
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        assert_eq!(generator.call_count(), 0);
        assert_eq!(status_of(&store, "a"), GenerationStatus::Draft);
    }

    #[tokio::test]
    async fn test_generate_single_uses_live_graph() {
        let nodes = vec![node("a", NodeKind::Prop, "A rune blade")];
        let store = store_of(&nodes, &[]);
        let generator = ScriptedGenerator::default();
        let token = store.begin_run();

        generate_single(
            &store,
            token,
            &NodeId::from("a"),
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;

        assert_eq!(status_of(&store, "a"), GenerationStatus::Done);

        // Locked nodes are refused even on the manual path
        store.update_node(
            &NodeId::from("a"),
            NodePatch {
                locked: Some(true),
                ..NodePatch::default()
            },
        );
        generate_single(
            &store,
            token,
            &NodeId::from("a"),
            &StyleDna::default(),
            GameMode::ThreeD,
            &generator,
        )
        .await;
        assert_eq!(generator.call_count(), 1);
    }
}
