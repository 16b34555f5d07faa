// SPDX-License-Identifier: MIT OR Apache-2.0
//! Generation pipeline for GameForge.
//!
//! This crate turns briefs and node descriptions into generated assets:
//! - Provider contracts for the external generative services
//! - The blueprint wire format and the intake pipeline around it
//! - Prompt composition from descriptions, context and Style DNA
//! - A shared graph store with run-epoch cancellation
//! - The sequential, context-aware generation orchestrator
//! - Export snapshot assembly for publishing finished assets
//!
//! ## Architecture
//!
//! All I/O happens behind the [`provider`] traits. The orchestrator walks
//! a frozen snapshot of the graph one node at a time, so each node's
//! context reflects the graph as it stood when the batch started, and
//! per-node failures never abort the batch.

pub mod blueprint;
pub mod export;
pub mod intake;
pub mod orchestrator;
pub mod prompt;
pub mod provider;
pub mod store;

pub use blueprint::{Blueprint, BlueprintEdge, BlueprintNode, BlueprintRequest};
pub use export::{ExportReceipt, ExportSnapshot, ProjectMetadata, UploadImage};
pub use intake::{run_blueprint_intake, IntakeOutcome, PipelineError};
pub use orchestrator::{generate_single, parent_context, run_sequential_generation};
pub use prompt::AssetPrompt;
pub use provider::{
    AssetGenerator, AssetRequest, AssetSink, BlueprintGenerator, DescriptionRequest,
    ProviderError, StyleAdapter, TextGenerator,
};
pub use store::{GraphStore, RunToken};
