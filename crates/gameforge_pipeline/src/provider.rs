// SPDX-License-Identifier: MIT OR Apache-2.0
//! Contracts for the external generative capabilities.
//!
//! The pipeline never talks to an AI or storage service directly; it goes
//! through these traits. Implementations wrap whatever HTTP clients a
//! deployment uses; `gameforge_studio` ships offline stand-ins for demos
//! and tests.

use gameforge_graph::{GameMode, NodeKind, StyleDna};

use crate::blueprint::{Blueprint, BlueprintRequest};
use crate::export::{ProjectMetadata, UploadImage};

/// Error reported by an external provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// The service could not be reached or is down
    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    /// The service rejected the request (auth, quota, safety)
    #[error("Provider rejected request: {0}")]
    Rejected(String),

    /// The service answered with something the pipeline cannot use
    #[error("Malformed provider response: {0}")]
    Malformed(String),
}

/// Everything an asset generator needs for one node.
#[derive(Debug, Clone, Copy)]
pub struct AssetRequest<'a> {
    /// The node's visual description
    pub description: &'a str,
    /// Style DNA snapshot for this batch
    pub style: &'a StyleDna,
    /// Node category
    pub kind: NodeKind,
    /// Finer-grained tag, when present
    pub subkind: Option<&'a str>,
    /// Upstream context assembled from parent nodes; empty when none
    pub context: &'a str,
    /// Project game mode
    pub game_mode: GameMode,
    /// Per-node perspective override
    pub perspective: Option<&'a str>,
}

impl AssetRequest<'_> {
    /// The most specific type tag for this request.
    pub fn target_kind(&self) -> &str {
        self.subkind.unwrap_or(self.kind.as_str())
    }
}

/// Inputs for drafting a node description.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionRequest<'a> {
    /// Node category
    pub kind: NodeKind,
    /// Finer-grained tag, when present
    pub subkind: Option<&'a str>,
    /// Node label
    pub label: &'a str,
    /// Upstream context; callers pass a stock line when there is none
    pub context: &'a str,
    /// Existing description to enhance, when present
    pub existing: &'a str,
}

/// Synthesizes a whole game blueprint (nodes + edges) from a brief.
///
/// `Ok(None)` means the provider declined to produce a blueprint; both
/// that and `Err` abort intake before any graph is installed. Returned
/// ids are externally chosen strings and may collide with future locally
/// created ones; the graph's id allocator accounts for that.
pub trait BlueprintGenerator {
    /// Produce a candidate blueprint for the request.
    async fn generate(&self, request: &BlueprintRequest)
        -> Result<Option<Blueprint>, ProviderError>;
}

/// Derives a Style DNA from a structured brief.
///
/// `Ok(None)` keeps the session's current style.
pub trait StyleAdapter {
    /// Produce an adapted style for the request.
    async fn adapt(&self, request: &BlueprintRequest) -> Result<Option<StyleDna>, ProviderError>;
}

/// Generates one image per call.
///
/// Safe to call repeatedly and independently per node. Failure is
/// signaled by `Err` or `Ok(None)`/empty, never by hanging silently.
pub trait AssetGenerator {
    /// Generate an image for the request; the result is a data URL or
    /// remote URL.
    async fn generate(&self, request: &AssetRequest<'_>)
        -> Result<Option<String>, ProviderError>;
}

/// Drafts or enhances node descriptions.
pub trait TextGenerator {
    /// Write a concise visual description for the node.
    async fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, ProviderError>;
}

/// Downstream sink for the export snapshot (object storage, disk, ...).
pub trait AssetSink {
    /// Upload generated images; returns one public URL per image, in
    /// input order.
    async fn upload_images(&self, images: &[UploadImage]) -> Result<Vec<String>, ProviderError>;

    /// Persist the project metadata document; returns its public URL.
    async fn save_metadata(
        &self,
        metadata: &ProjectMetadata,
        filename: &str,
    ) -> Result<String, ProviderError>;
}
