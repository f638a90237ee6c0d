//! The scoring orchestrator.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use rayon::prelude::*;

use crate::config::{ScoringConfig, SizeAggregation};
use crate::evidence::{ModelHost, RepoSummarySource};
use crate::metrics::{standard_evaluators, MetricEvaluator};
use crate::model::{
    clamp_score, AuditRecord, MetricOutcome, MetricValue, ModelContext, SizeScore,
};

/// Turns one model context into one audit record.
///
/// Holds its own config and evidence handles; nothing is read from ambient
/// global state, so independent orchestrators can score in parallel and tests
/// can inject deterministic providers.
pub struct ScoreOrchestrator {
    config: ScoringConfig,
    host: Arc<dyn ModelHost>,
    evaluators: Vec<Box<dyn MetricEvaluator>>,
}

impl ScoreOrchestrator {
    /// Create an orchestrator with the standard evaluator registry.
    #[must_use]
    pub fn new(
        config: ScoringConfig,
        host: Arc<dyn ModelHost>,
        miner: Arc<dyn RepoSummarySource>,
    ) -> Self {
        let evaluators = standard_evaluators(Arc::clone(&host), miner);
        Self {
            config,
            host,
            evaluators,
        }
    }

    /// Create an orchestrator with a caller-supplied evaluator list.
    #[must_use]
    pub fn with_evaluators(
        config: ScoringConfig,
        host: Arc<dyn ModelHost>,
        evaluators: Vec<Box<dyn MetricEvaluator>>,
    ) -> Self {
        Self {
            config,
            host,
            evaluators,
        }
    }

    #[must_use]
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Sequentially populate the context's evidence fields, best-effort.
    ///
    /// A failing or panicking provider call leaves the corresponding field
    /// unset and enrichment proceeds with the rest — partial evidence must
    /// always be scorable. Must fully complete before metric fan-out.
    pub fn enrich(&self, context: &mut ModelContext) {
        let model = context.model.clone();

        if context.metadata.is_none() {
            context.metadata = guarded("fetch_metadata", || self.host.fetch_metadata(&model));
        }
        if context.readme.is_none() {
            context.readme = guarded("fetch_readme", || self.host.fetch_readme(&model));
        }
        if context.config_docs.is_empty() {
            if let Some(docs) = guarded("fetch_config", || self.host.fetch_config(&model)) {
                context.config_docs = docs;
            }
        }
    }

    /// Score an enriched, now-immutable context.
    pub fn audit(&self, context: &ModelContext) -> AuditRecord {
        // Net latency spans the whole fan-out + aggregate step: the metrics
        // run concurrently, so their latencies must not be summed.
        let started = Instant::now();
        let outcomes = self.compute_metrics(context);
        let net_score = self.aggregate(&outcomes);
        let net_latency = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

        assemble(&context.model.name, net_score, net_latency, &outcomes)
    }

    /// Fan out every evaluator concurrently against the read-only context.
    ///
    /// Each invocation is isolated: a panic inside one evaluator is logged
    /// and replaced with a zero outcome, never aborting its siblings.
    fn compute_metrics(&self, context: &ModelContext) -> Vec<(&'static str, MetricOutcome)> {
        self.evaluators
            .par_iter()
            .map(|evaluator| {
                let name = evaluator.name();
                let outcome =
                    catch_unwind(AssertUnwindSafe(|| evaluator.compute(context, &self.config)))
                        .unwrap_or_else(|_| {
                            tracing::error!("metric {name} panicked; scoring it 0");
                            MetricOutcome::zero()
                        });
                (name, outcome)
            })
            .collect()
    }

    /// Weighted average over metrics with a registered weight.
    fn aggregate(&self, outcomes: &[(&'static str, MetricOutcome)]) -> f64 {
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for (name, outcome) in outcomes {
            let Some(weight) = self.config.weights.weight_for(name) else {
                continue;
            };
            let scalar = match outcome.value {
                MetricValue::Scalar(value) => value,
                MetricValue::PerDevice(scores) => match self.config.size_aggregation {
                    SizeAggregation::Mean => scores.mean(),
                    SizeAggregation::Max => scores.max(),
                },
            };
            weighted_sum += weight * scalar;
            total_weight += weight;
        }

        if total_weight <= 0.0 {
            0.0
        } else {
            clamp_score(weighted_sum / total_weight)
        }
    }
}

/// Run a provider call, converting a panic into an absent result.
fn guarded<T>(what: &str, f: impl FnOnce() -> Option<T>) -> Option<T> {
    catch_unwind(AssertUnwindSafe(f)).unwrap_or_else(|_| {
        tracing::warn!("evidence provider panicked during {what}; treating as absent");
        None
    })
}

fn scalar_of(outcomes: &[(&'static str, MetricOutcome)], name: &str) -> (f64, u64) {
    outcomes
        .iter()
        .find(|(n, _)| *n == name)
        .map_or((0.0, 0), |(_, o)| match o.value {
            MetricValue::Scalar(value) => (value, o.latency_ms),
            MetricValue::PerDevice(_) => (0.0, o.latency_ms),
        })
}

fn size_of(outcomes: &[(&'static str, MetricOutcome)]) -> (SizeScore, u64) {
    outcomes
        .iter()
        .find(|(n, _)| *n == "size_score")
        .map_or((SizeScore::zero(), 0), |(_, o)| match o.value {
            MetricValue::PerDevice(scores) => (scores, o.latency_ms),
            MetricValue::Scalar(_) => (SizeScore::zero(), o.latency_ms),
        })
}

/// Copy every metric's score/latency into the flattened output shape.
fn assemble(
    name: &str,
    net_score: f64,
    net_latency: u64,
    outcomes: &[(&'static str, MetricOutcome)],
) -> AuditRecord {
    let (ramp_up_time, ramp_up_time_latency) = scalar_of(outcomes, "ramp_up_time");
    let (bus_factor, bus_factor_latency) = scalar_of(outcomes, "bus_factor");
    let (performance_claims, performance_claims_latency) =
        scalar_of(outcomes, "performance_claims");
    let (license, license_latency) = scalar_of(outcomes, "license");
    let (size_score, size_score_latency) = size_of(outcomes);
    let (dataset_and_code_score, dataset_and_code_score_latency) =
        scalar_of(outcomes, "dataset_and_code_score");
    let (dataset_quality, dataset_quality_latency) = scalar_of(outcomes, "dataset_quality");
    let (code_quality, code_quality_latency) = scalar_of(outcomes, "code_quality");

    AuditRecord {
        name: name.to_string(),
        category: "MODEL".to_string(),
        net_score,
        net_score_latency: net_latency,
        ramp_up_time,
        ramp_up_time_latency,
        bus_factor,
        bus_factor_latency,
        performance_claims,
        performance_claims_latency,
        license,
        license_latency,
        size_score,
        size_score_latency,
        dataset_and_code_score,
        dataset_and_code_score_latency,
        dataset_quality,
        dataset_quality_latency,
        code_quality,
        code_quality_latency,
    }
}
