//! Core data model for model-audit.
//!
//! Everything the scoring engine operates on is an explicit value record:
//! [`ResourceReference`] identifies a remote resource, [`ModelContext`]
//! bundles a model with its linked datasets/code plus fetched evidence, and
//! [`AuditRecord`] is the flattened NDJSON output shape. Score-carrying types
//! validate their invariants (scores in [0,1], latencies ≥ 0) at construction.

mod context;
mod record;
mod resource;

pub use context::{HostMetadata, ModelContext, RepoFile};
pub use record::{clamp_score, AuditRecord, MetricOutcome, MetricValue, SizeScore};
pub use resource::{Platform, ResourceCategory, ResourceReference};
