//! Scoring orchestration.
//!
//! Turns one enriched [`ModelContext`](crate::model::ModelContext) into one
//! [`AuditRecord`](crate::model::AuditRecord): sequential best-effort
//! enrichment, concurrent metric fan-out, weighted-average aggregation, and
//! record assembly.

mod orchestrator;

pub use orchestrator::ScoreOrchestrator;
