//! Metric evaluators.
//!
//! Each evaluator is an independent scoring unit implementing
//! [`MetricEvaluator`]: it declares a stable name (the config/weight lookup
//! key), computes a bounded score from a read-only [`ModelContext`], and
//! measures its own latency. Evaluators are deterministic for a given
//! context+config and never panic on missing evidence — absence always maps
//! to a defined default score.

pub mod text;

mod bus_factor;
mod code_quality;
mod dataset_and_code;
mod dataset_quality;
mod license;
mod performance_claims;
mod ramp_up;
mod size;

pub use bus_factor::BusFactor;
pub use code_quality::{CodeQuality, StaticAnalysis};
pub use dataset_and_code::DatasetAndCode;
pub use dataset_quality::DatasetQuality;
pub use license::License;
pub use performance_claims::PerformanceClaims;
pub use ramp_up::RampUpTime;
pub use size::SizeFit;

use std::sync::Arc;
use std::time::Instant;

use crate::config::ScoringConfig;
use crate::evidence::{ModelHost, RepoSummarySource};
use crate::model::{MetricOutcome, ModelContext};

/// A single independent metric-scoring unit.
pub trait MetricEvaluator: Send + Sync {
    /// Stable name used as the config/weight lookup key and output field.
    fn name(&self) -> &'static str;

    /// Score the context. Must not panic for missing or partial evidence.
    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome;
}

/// Run a closure and report its wall-clock span in whole milliseconds.
pub(crate) fn timed<T>(f: impl FnOnce() -> T) -> (T, u64) {
    let start = Instant::now();
    let value = f();
    let latency_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    (value, latency_ms)
}

/// The fixed, ordered evaluator registry consumed by the orchestrator.
#[must_use]
pub fn standard_evaluators(
    host: Arc<dyn ModelHost>,
    miner: Arc<dyn RepoSummarySource>,
) -> Vec<Box<dyn MetricEvaluator>> {
    vec![
        Box::new(RampUpTime),
        Box::new(BusFactor::new(Arc::clone(&miner))),
        Box::new(PerformanceClaims),
        Box::new(License),
        Box::new(SizeFit),
        Box::new(DatasetAndCode),
        Box::new(DatasetQuality::new(host)),
        Box::new(CodeQuality::new(miner)),
    ]
}
