// SPDX-License-Identifier: MIT OR Apache-2.0
//! Offline provider stand-ins.
//!
//! Demo and test implementations of the pipeline's provider contracts:
//! no network, no credentials, deterministic enough to assert on. The
//! placeholder generator hands out seeded picsum URLs; the local sink
//! writes the export under a directory and answers with `file://` URLs.

use gameforge_graph::StyleDna;
use gameforge_pipeline::{
    AssetGenerator, AssetRequest, AssetSink, Blueprint, BlueprintGenerator, BlueprintRequest,
    DescriptionRequest, ProjectMetadata, ProviderError, StyleAdapter, TextGenerator, UploadImage,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Blueprint generator that always answers with a fixed blueprint.
#[derive(Debug, Clone)]
pub struct CannedBlueprint {
    blueprint: Blueprint,
}

impl CannedBlueprint {
    /// Wrap a fixture blueprint.
    pub fn new(blueprint: Blueprint) -> Self {
        Self { blueprint }
    }

    /// The demo fixture: a small but fully connected pre-production
    /// graph spanning every rank row.
    pub fn demo() -> Self {
        let json = include_str!("../fixtures/demo_blueprint.json");
        Self::new(serde_json::from_str(json).expect("demo blueprint fixture is valid JSON"))
    }
}

impl BlueprintGenerator for CannedBlueprint {
    async fn generate(
        &self,
        _request: &BlueprintRequest,
    ) -> Result<Option<Blueprint>, ProviderError> {
        Ok(Some(self.blueprint.clone()))
    }
}

/// Style adapter that always keeps the session style.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeepSessionStyle;

impl StyleAdapter for KeepSessionStyle {
    async fn adapt(&self, _request: &BlueprintRequest) -> Result<Option<StyleDna>, ProviderError> {
        Ok(None)
    }
}

/// Asset generator handing out seeded placeholder image URLs.
///
/// Optionally fails every n-th call so demos can show failure isolation
/// in the batch walk.
#[derive(Debug, Default)]
pub struct PlaceholderAssets {
    calls: AtomicUsize,
    fail_every: Option<usize>,
}

impl PlaceholderAssets {
    /// A generator that never fails.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail every `n`-th call (1-based).
    pub fn failing_every(n: usize) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            fail_every: Some(n),
        }
    }
}

impl AssetGenerator for PlaceholderAssets {
    async fn generate(&self, request: &AssetRequest<'_>) -> Result<Option<String>, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        if let Some(n) = self.fail_every {
            if call % n == 0 {
                return Err(ProviderError::Unavailable(
                    "placeholder generator injected failure".to_owned(),
                ));
            }
        }
        let seed = format!("{}-{call}", request.target_kind());
        Ok(Some(format!("https://picsum.photos/seed/{seed}/512/512")))
    }
}

/// Deterministic description writer.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticWriter;

impl TextGenerator for StaticWriter {
    async fn describe(&self, request: &DescriptionRequest<'_>) -> Result<String, ProviderError> {
        let target = request.subkind.unwrap_or(request.kind.as_str());
        let base = if request.existing.is_empty() {
            format!("A striking {target} named \"{}\"", request.label)
        } else {
            format!("{}, reimagined", request.existing.trim_end_matches('.'))
        };
        Ok(format!("{base}, drawn from: {}.", request.context))
    }
}

/// Export sink writing images and metadata under a local directory.
#[derive(Debug, Clone)]
pub struct LocalSink {
    dir: PathBuf,
}

impl LocalSink {
    /// Sink writing into `dir`, creating it on first use.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn file_url(&self, filename: &str) -> String {
        format!("file://{}", self.dir.join(filename).display())
    }
}

impl AssetSink for LocalSink {
    async fn upload_images(&self, images: &[UploadImage]) -> Result<Vec<String>, ProviderError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        let mut urls = Vec::with_capacity(images.len());
        for image in images {
            // Remote URLs are recorded rather than fetched; data URLs are
            // written out as-is for inspection.
            tokio::fs::write(self.dir.join(&image.filename), image.data.as_bytes())
                .await
                .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
            urls.push(self.file_url(&image.filename));
        }
        Ok(urls)
    }

    async fn save_metadata(
        &self,
        metadata: &ProjectMetadata,
        filename: &str,
    ) -> Result<String, ProviderError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        let json = serde_json::to_vec_pretty(metadata)
            .map_err(|e| ProviderError::Malformed(e.to_string()))?;
        tokio::fs::write(self.dir.join(filename), json)
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;
        Ok(self.file_url(filename))
    }
}
