// SPDX-License-Identifier: MIT OR Apache-2.0
//! Export snapshot assembly.
//!
//! Exporting publishes the generated images plus one metadata document
//! through an [`AssetSink`](crate::provider::AssetSink). Collection is
//! pure; only [`ExportSnapshot::publish`] performs I/O.

use gameforge_graph::{GameMode, Graph, NodeId, NodeKind, StyleDna};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::provider::{AssetSink, ProviderError};

/// Project name used when the graph has no world node to take it from.
pub const FALLBACK_PROJECT_NAME: &str = "game-project";

/// One image payload handed to the sink.
#[derive(Debug, Clone)]
pub struct UploadImage {
    /// Node the image belongs to
    pub node_id: NodeId,
    /// Data URL or remote URL as stored on the node
    pub data: String,
    /// Target object name
    pub filename: String,
}

/// Per-asset line in the metadata document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetRecord {
    /// Node id
    pub node_id: String,
    /// Display label
    pub label: String,
    /// Most specific type tag
    pub target: String,
    /// Public URL after upload
    pub url: String,
}

/// The metadata document persisted alongside the images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Project name (first world node's label, or a fallback)
    pub project_name: String,
    /// 2D or 3D
    pub game_mode: GameMode,
    /// Style the assets were generated with
    pub style: StyleDna,
    /// One record per uploaded asset
    pub assets: Vec<AssetRecord>,
    /// Unix milliseconds at collection time
    pub generated_at: u128,
    /// Convenience count
    pub total_assets: usize,
}

/// Receipt returned by a successful publish.
#[derive(Debug, Clone)]
pub struct ExportReceipt {
    /// Public URL of the metadata document
    pub metadata_url: String,
    /// Public URLs of the uploaded images, in collection order
    pub asset_urls: Vec<String>,
}

/// Lowercase a name and collapse anything non-alphanumeric to `-`.
pub fn sanitize(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect()
}

/// Object name for one asset image.
pub fn asset_filename(node_id: &NodeId, target: &str, timestamp_ms: u128) -> String {
    format!(
        "gameforge-{timestamp_ms}-{}-{}.png",
        sanitize(target),
        sanitize(node_id.as_str())
    )
}

/// Object name for the project metadata document.
pub fn metadata_filename(project_name: &str, timestamp_ms: u128) -> String {
    format!("gameforge-project-{}-{timestamp_ms}.json", sanitize(project_name))
}

fn now_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

/// Everything an export needs, frozen at collection time.
#[derive(Debug, Clone)]
pub struct ExportSnapshot {
    /// Project name derived from the graph
    pub project_name: String,
    /// 2D or 3D
    pub game_mode: GameMode,
    /// Style snapshot
    pub style: StyleDna,
    /// Images to upload
    pub images: Vec<UploadImage>,
    records: Vec<AssetRecord>,
    timestamp_ms: u128,
}

impl ExportSnapshot {
    /// Gather every node that carries an image.
    ///
    /// The project name is the label of the first world node in
    /// insertion order; imageless nodes are left out of the snapshot
    /// entirely.
    pub fn collect(graph: &Graph, game_mode: GameMode, style: &StyleDna) -> Self {
        let timestamp_ms = now_millis();
        let project_name = graph
            .nodes()
            .find(|n| n.kind == NodeKind::World)
            .map(|n| n.label.clone())
            .unwrap_or_else(|| FALLBACK_PROJECT_NAME.to_owned());

        let mut images = Vec::new();
        let mut records = Vec::new();
        for node in graph.nodes() {
            let Some(data) = node.image.as_deref().filter(|i| !i.is_empty()) else {
                continue;
            };
            let target = node.target_kind().to_owned();
            images.push(UploadImage {
                node_id: node.id.clone(),
                data: data.to_owned(),
                filename: asset_filename(&node.id, &target, timestamp_ms),
            });
            records.push(AssetRecord {
                node_id: node.id.to_string(),
                label: node.label.clone(),
                target,
                url: String::new(),
            });
        }

        Self {
            project_name,
            game_mode,
            style: style.clone(),
            images,
            records,
            timestamp_ms,
        }
    }

    /// Upload the images, then persist the metadata document referencing
    /// their public URLs.
    pub async fn publish<S: AssetSink>(mut self, sink: &S) -> Result<ExportReceipt, ProviderError> {
        let asset_urls = sink.upload_images(&self.images).await?;
        if asset_urls.len() != self.records.len() {
            return Err(ProviderError::Malformed(format!(
                "sink returned {} urls for {} images",
                asset_urls.len(),
                self.records.len()
            )));
        }
        for (record, url) in self.records.iter_mut().zip(&asset_urls) {
            record.url = url.clone();
        }

        let total_assets = self.records.len();
        let metadata = ProjectMetadata {
            project_name: self.project_name.clone(),
            game_mode: self.game_mode,
            style: self.style,
            assets: self.records,
            generated_at: self.timestamp_ms,
            total_assets,
        };
        let filename = metadata_filename(&metadata.project_name, self.timestamp_ms);
        let metadata_url = sink.save_metadata(&metadata, &filename).await?;

        tracing::info!(
            project = %metadata.project_name,
            assets = total_assets,
            %metadata_url,
            "export published"
        );
        Ok(ExportReceipt {
            metadata_url,
            asset_urls,
        })
    }
}
