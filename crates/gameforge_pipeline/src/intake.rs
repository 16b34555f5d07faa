// SPDX-License-Identifier: MIT OR Apache-2.0
//! Blueprint intake: brief -> positioned graph -> generation batch.
//!
//! Blueprint synthesis and style adaptation are independent, so they run
//! concurrently; everything downstream (layout, graph install, the
//! sequential generation walk) is strictly ordered. A failed or declined
//! blueprint aborts before any graph is installed.

use gameforge_graph::{layout, Edge, EdgeId, GraphError, Node, NodeId, NodeKind, StyleDna};

use crate::blueprint::{Blueprint, BlueprintRequest};
use crate::orchestrator::run_sequential_generation;
use crate::provider::{AssetGenerator, BlueprintGenerator, ProviderError, StyleAdapter};
use crate::store::GraphStore;

/// What a completed intake produced.
#[derive(Debug, Clone)]
pub struct IntakeOutcome {
    /// Title proposed by the blueprint provider
    pub title: String,
    /// The style the batch was generated with (adapted or session)
    pub style: StyleDna,
    /// Number of nodes installed
    pub node_count: usize,
    /// Number of edges installed
    pub edge_count: usize,
}

/// Error aborting a blueprint intake. Per-node generation failures are
/// not errors at this level; they surface as nodes left in draft.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// The blueprint provider failed outright
    #[error("Blueprint generation failed")]
    Blueprint(#[source] ProviderError),

    /// The blueprint provider declined the brief
    #[error("Blueprint provider declined the brief")]
    BlueprintDeclined,

    /// The style adapter failed outright
    #[error("Style adaptation failed")]
    Style(#[source] ProviderError),

    /// The blueprint produced an inconsistent graph
    #[error("Blueprint produced an invalid graph")]
    Graph(#[from] GraphError),
}

/// Convert blueprint wire nodes/edges into graph types.
///
/// Unknown kind strings land in [`NodeKind::Prop`]; the request's
/// perspective is stamped onto every node so later regeneration keeps
/// the framing the blueprint was designed for. Edges get index-based
/// ids.
fn convert(blueprint: &Blueprint, request: &BlueprintRequest) -> (Vec<Node>, Vec<Edge>) {
    let nodes = blueprint
        .nodes
        .iter()
        .map(|n| {
            let mut node = Node::new(
                NodeId::new(n.id.clone()),
                NodeKind::parse_lossy(&n.kind),
                n.label.clone(),
            )
            .with_description(n.description.clone());
            node.subkind = n.subtype.clone();
            node.perspective = Some(request.perspective.clone());
            node
        })
        .collect();
    let edges = blueprint
        .edges
        .iter()
        .enumerate()
        .map(|(idx, e)| {
            Edge::new(
                EdgeId::new(format!("e-{idx}")),
                NodeId::new(e.source.clone()),
                NodeId::new(e.target.clone()),
            )
        })
        .collect();
    (nodes, edges)
}

/// Run the whole intake pipeline: synthesize a blueprint and an adapted
/// style concurrently, lay the graph out, install it, then walk it with
/// the sequential generator.
///
/// The adapted style (or the session style when the adapter declines) is
/// frozen for the entire batch.
pub async fn run_blueprint_intake<B, S, G>(
    store: &GraphStore,
    request: &BlueprintRequest,
    session_style: &StyleDna,
    blueprints: &B,
    styles: &S,
    assets: &G,
) -> Result<IntakeOutcome, PipelineError>
where
    B: BlueprintGenerator,
    S: StyleAdapter,
    G: AssetGenerator,
{
    let (blueprint, adapted) =
        tokio::join!(blueprints.generate(request), styles.adapt(request));

    let blueprint = blueprint
        .map_err(PipelineError::Blueprint)?
        .ok_or(PipelineError::BlueprintDeclined)?;
    let style = adapted
        .map_err(PipelineError::Style)?
        .unwrap_or_else(|| session_style.clone());

    tracing::info!(
        title = %blueprint.title,
        nodes = blueprint.nodes.len(),
        edges = blueprint.edges.len(),
        "blueprint received"
    );

    let (nodes, edges) = convert(&blueprint, request);
    let positioned = layout(nodes, &edges);
    store.replace_graph(positioned.clone(), edges.clone())?;

    let token = store.begin_run();
    run_sequential_generation(
        store,
        token,
        &positioned,
        &edges,
        &style,
        request.game_mode,
        assets,
    )
    .await;

    Ok(IntakeOutcome {
        title: blueprint.title,
        style,
        node_count: positioned.len(),
        edge_count: edges.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprint::{BlueprintEdge, BlueprintNode};
    use crate::provider::AssetRequest;
    use gameforge_graph::layout::{BASE_OFFSET_Y, ROW_HEIGHT};
    use gameforge_graph::{GameMode, GenerationStatus};

    struct CannedBlueprints(Option<Blueprint>);

    impl BlueprintGenerator for CannedBlueprints {
        async fn generate(
            &self,
            _request: &BlueprintRequest,
        ) -> Result<Option<Blueprint>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct FailingBlueprints;

    impl BlueprintGenerator for FailingBlueprints {
        async fn generate(
            &self,
            _request: &BlueprintRequest,
        ) -> Result<Option<Blueprint>, ProviderError> {
            Err(ProviderError::Unavailable("down".to_owned()))
        }
    }

    struct CannedStyles(Option<StyleDna>);

    impl StyleAdapter for CannedStyles {
        async fn adapt(
            &self,
            _request: &BlueprintRequest,
        ) -> Result<Option<StyleDna>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    struct EchoAssets;

    impl AssetGenerator for EchoAssets {
        async fn generate(
            &self,
            request: &AssetRequest<'_>,
        ) -> Result<Option<String>, ProviderError> {
            Ok(Some(format!("img://{}", request.target_kind())))
        }
    }

    fn brief() -> BlueprintRequest {
        BlueprintRequest {
            concept: "Sky pirates over a shattered moon".to_owned(),
            platform: "PC".to_owned(),
            perspective: "Isometric".to_owned(),
            genre: "Action RPG".to_owned(),
            art_style: String::new(),
            mechanics: String::new(),
            audience: String::new(),
            game_mode: GameMode::ThreeD,
        }
    }

    fn fixture() -> Blueprint {
        Blueprint {
            title: "Skyfall".to_owned(),
            nodes: vec![
                BlueprintNode {
                    id: "n1".to_owned(),
                    kind: "world".to_owned(),
                    subtype: Some("world".to_owned()),
                    label: "Aeloria".to_owned(),
                    description: "A floating kingdom".to_owned(),
                },
                BlueprintNode {
                    id: "n2".to_owned(),
                    kind: "character".to_owned(),
                    subtype: Some("protagonist".to_owned()),
                    label: "Kael".to_owned(),
                    description: "A sky pirate with a brass compass".to_owned(),
                },
            ],
            edges: vec![BlueprintEdge {
                source: "n1".to_owned(),
                target: "n2".to_owned(),
            }],
        }
    }

    #[tokio::test]
    async fn test_intake_end_to_end() {
        let store = GraphStore::default();
        let outcome = run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &CannedBlueprints(Some(fixture())),
            &CannedStyles(None),
            &EchoAssets,
        )
        .await
        .unwrap();

        assert_eq!(outcome.title, "Skyfall");
        assert_eq!(outcome.node_count, 2);
        store.read(|g| {
            let world = g.node(&NodeId::from("n1")).unwrap();
            assert_eq!(world.position.y, BASE_OFFSET_Y);
            assert_eq!(world.status, GenerationStatus::Done);
            assert_eq!(world.image.as_deref(), Some("img://world"));
            // Blueprint perspective stamped onto nodes
            assert_eq!(world.perspective.as_deref(), Some("Isometric"));

            let hero = g.node(&NodeId::from("n2")).unwrap();
            assert_eq!(hero.position.y, 4.0 * ROW_HEIGHT + BASE_OFFSET_Y);
            assert_eq!(hero.image.as_deref(), Some("img://protagonist"));
        });
    }

    #[tokio::test]
    async fn test_adapted_style_wins() {
        let store = GraphStore::default();
        let mut adapted = StyleDna::default();
        adapted.name = "Solar Punk".to_owned();
        let outcome = run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &CannedBlueprints(Some(fixture())),
            &CannedStyles(Some(adapted)),
            &EchoAssets,
        )
        .await
        .unwrap();
        assert_eq!(outcome.style.name, "Solar Punk");
    }

    #[tokio::test]
    async fn test_blueprint_failure_installs_nothing() {
        let store = GraphStore::default();
        let err = run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &FailingBlueprints,
            &CannedStyles(None),
            &EchoAssets,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::Blueprint(_)));
        store.read(|g| assert_eq!(g.node_count(), 0));
    }

    #[tokio::test]
    async fn test_declined_blueprint_installs_nothing() {
        let store = GraphStore::default();
        let err = run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &CannedBlueprints(None),
            &CannedStyles(None),
            &EchoAssets,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::BlueprintDeclined));
        store.read(|g| assert_eq!(g.node_count(), 0));
    }

    #[tokio::test]
    async fn test_dangling_blueprint_edge_rejected() {
        let store = GraphStore::default();
        let mut bad = fixture();
        bad.edges.push(BlueprintEdge {
            source: "n1".to_owned(),
            target: "ghost".to_owned(),
        });
        let err = run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &CannedBlueprints(Some(bad)),
            &CannedStyles(None),
            &EchoAssets,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, PipelineError::Graph(GraphError::DanglingEdge { .. })));
        store.read(|g| assert_eq!(g.node_count(), 0));
    }

    #[tokio::test]
    async fn test_unknown_kind_becomes_prop() {
        let store = GraphStore::default();
        let mut bp = fixture();
        bp.nodes.push(BlueprintNode {
            id: "n3".to_owned(),
            kind: "soundtrack".to_owned(),
            subtype: None,
            label: "Main Theme".to_owned(),
            description: "Sweeping orchestral motif".to_owned(),
        });
        run_blueprint_intake(
            &store,
            &brief(),
            &StyleDna::default(),
            &CannedBlueprints(Some(bp)),
            &CannedStyles(None),
            &EchoAssets,
        )
        .await
        .unwrap();
        store.read(|g| {
            assert_eq!(g.node(&NodeId::from("n3")).unwrap().kind, NodeKind::Prop);
        });
    }
}
