// SPDX-License-Identifier: MIT OR Apache-2.0
//! GameForge Studio - AI-assisted game pre-production
//!
//! A visual planning environment for game pre-production featuring:
//! - An asset dependency graph (worlds, zones, characters, props, UI)
//! - Rank-based auto layout for generated blueprints
//! - Style DNA driven, context-aware sequential asset generation
//! - Local export of generated assets and project metadata
//!
//! ## Architecture
//!
//! The studio wires the `gameforge_graph` model and the
//! `gameforge_pipeline` orchestration together behind a
//! [`session::StudioSession`]. This binary runs the whole flow offline
//! against the stand-in providers in [`providers`].

mod library;
mod providers;
mod session;

use gameforge_graph::{GameMode, NodeId};
use gameforge_pipeline::BlueprintRequest;
use providers::{CannedBlueprint, KeepSessionStyle, LocalSink, PlaceholderAssets, StaticWriter};
use session::{StudioError, StudioSession};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("gameforge_studio=debug".parse().unwrap())
        .add_directive("gameforge_pipeline=debug".parse().unwrap());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting GameForge Studio v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run_demo().await {
        tracing::error!("Studio session failed: {e}");
        std::process::exit(1);
    }
}

/// Run the offline demo end to end: blueprint intake, a description
/// draft, a single-node regeneration and a local export.
async fn run_demo() -> Result<(), StudioError> {
    let session = StudioSession::new();

    let request = BlueprintRequest {
        concept: "A dying forge-world where the last smiths fight the cold".to_owned(),
        platform: "PC".to_owned(),
        perspective: "3D".to_owned(),
        genre: "Action RPG".to_owned(),
        art_style: "Painterly dark fantasy".to_owned(),
        mechanics: "Crafting, exploration".to_owned(),
        audience: "Core gamers".to_owned(),
        game_mode: GameMode::ThreeD,
    };

    // Every fifth generation call fails, to show failure isolation:
    // the affected node reverts to draft while the batch completes
    let outcome = session
        .run_blueprint(
            &request,
            &CannedBlueprint::demo(),
            &KeepSessionStyle,
            &PlaceholderAssets::failing_every(5),
        )
        .await?;
    tracing::info!(
        title = %outcome.title,
        nodes = outcome.node_count,
        edges = outcome.edge_count,
        "blueprint intake complete"
    );

    session.store().read(|g| {
        for node in g.nodes() {
            tracing::info!(
                node = %node.id,
                label = %node.label,
                target = node.target_kind(),
                status = ?node.status,
                x = node.position.x,
                y = node.position.y,
                "laid out"
            );
        }
    });

    // Enrich the protagonist and regenerate it with the new description
    let hero = NodeId::from("n4");
    let description = session.write_description(&hero, &StaticWriter).await?;
    tracing::info!(node = %hero, %description, "description drafted");
    session
        .regenerate_node(&hero, &PlaceholderAssets::new())
        .await?;

    // Add one node from the library palette and generate it too
    let palette = library::library_for(session.game_mode());
    tracing::debug!(
        categories = palette.len(),
        first = palette[0].name,
        "library palette loaded"
    );
    let prop = session.add_library_node(&palette[4].entries[0]);
    session.write_description(&prop, &StaticWriter).await?;
    session
        .regenerate_node(&prop, &PlaceholderAssets::new())
        .await?;

    let export_dir = std::env::temp_dir().join("gameforge-export");
    let receipt = session.export(&LocalSink::new(&export_dir)).await?;
    tracing::info!(
        metadata = %receipt.metadata_url,
        assets = receipt.asset_urls.len(),
        "export complete"
    );
    Ok(())
}
