//! **Heuristic quality auditing for machine-learning model listings.**
//!
//! `model-audit` scores ML models hosted on a model hub from the evidence a
//! listing exposes: README/model-card text, structured hosting metadata
//! (downloads, likes, tags, file listings), and the git history of linked
//! code repositories. Eight independent heuristic metrics — license clarity,
//! ramp-up ease, bus factor, performance-claim documentation,
//! size/deployability, dataset-and-code linkage, dataset quality and code
//! quality — are combined into a weighted net score, and each audited model
//! becomes one newline-delimited JSON record on stdout.
//!
//! ## Core Concepts & Modules
//!
//! - **[`model`]**: the value records everything else operates on —
//!   [`ResourceReference`], [`ModelContext`] (the evidence bundle scored as
//!   one unit) and [`AuditRecord`] (the flattened NDJSON output shape).
//! - **[`classify`]**: URL classification (MODEL/DATASET/CODE) and the
//!   association of datasets and code repositories with nearby models.
//! - **[`evidence`]**: the provider boundary. Every fetch returns `None` on
//!   failure, so partial evidence is always scorable. Network and git-backed
//!   providers live behind the `enrichment` feature (on by default).
//! - **[`metrics`]**: the eight [`MetricEvaluator`] implementations plus the
//!   shared text heuristics they build on.
//! - **[`scoring`]**: the [`ScoreOrchestrator`] — sequential best-effort
//!   enrichment, concurrent metric fan-out with per-evaluator isolation, and
//!   weighted-average aggregation.
//! - **[`config`]**: metric weights and heuristic thresholds, with YAML file
//!   loading that falls back to built-in defaults.
//! - **[`pipeline`]**: the batch driver and NDJSON emitter.
//!
//! ## Getting Started
//!
//! ```no_run
//! use std::sync::Arc;
//! use model_audit::evidence::{OfflineHost, OfflineMiner};
//! use model_audit::pipeline::{run_audit, AuditOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let options = AuditOptions {
//!         url_file: "urls.txt".into(),
//!         config_path: None,
//!     };
//!     let mut stdout = std::io::stdout().lock();
//!     let exit_code = run_audit(
//!         &options,
//!         Arc::new(OfflineHost),
//!         Arc::new(OfflineMiner),
//!         &mut stdout,
//!     )?;
//!     std::process::exit(exit_code);
//! }
//! ```
//!
//! ## Feature Flags
//!
//! - `enrichment` (default): network and git evidence providers
//!   ([`evidence::HubClient`], [`evidence::RepoMiner`]). Without it, audits
//!   run fully offline against default-valued evidence.

// Lint to discourage unwrap() in production code - prefer explicit error handling
#![warn(clippy::unwrap_used)]
#![allow(
    // usize↔f64 casts are pervasive in score arithmetic; values are bounded
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    // # Errors / # Panics doc sections are aspirational
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    // old/new and lower/limit style names are clear in context
    clippy::similar_names
)]

pub mod classify;
pub mod config;
pub mod error;
pub mod evidence;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod scoring;

// Re-export main types for convenience
pub use config::{MetricWeights, ScoringConfig, SizeAggregation};
pub use error::{AuditError, Result};
pub use evidence::{ModelHost, OfflineHost, OfflineMiner, RepoSummary, RepoSummarySource};
pub use metrics::MetricEvaluator;
pub use model::{AuditRecord, MetricOutcome, ModelContext, ResourceReference, SizeScore};
pub use pipeline::{run_audit, AuditOptions, NdjsonEmitter};
pub use scoring::ScoreOrchestrator;
