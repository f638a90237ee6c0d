//! Dataset-quality metric.
//!
//! For each linked dataset, counts how many of four quality fields its
//! README/metadata satisfies — description, size or sample counts, license,
//! benchmark references — and averages across datasets. With no linked
//! datasets the model's own README serves as fallback evidence.

use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::evidence::ModelHost;
use crate::metrics::{text, MetricEvaluator};
use crate::model::{HostMetadata, MetricOutcome, ModelContext};

const SIZE_INDICATORS: &[&str] = &[
    "size", "samples", "examples", "instances", "records", "entries", "rows", "mb", "gb",
    "million", "thousand",
];

const BENCHMARK_INDICATORS: &[&str] = &[
    "benchmark",
    "evaluation",
    "baseline",
    "accuracy",
    "f1",
    "bleu",
    "rouge",
    "glue",
    "squad",
    "results",
];

pub struct DatasetQuality {
    host: Arc<dyn ModelHost>,
}

impl DatasetQuality {
    #[must_use]
    pub fn new(host: Arc<dyn ModelHost>) -> Self {
        Self { host }
    }

    fn score(&self, context: &ModelContext, config: &ScoringConfig) -> f64 {
        let missing = config.thresholds.dataset_quality.missing_score;

        if context.datasets.is_empty() {
            return context
                .readme
                .as_deref()
                .map_or(missing, |readme| field_score(readme, None));
        }

        let mut total = 0.0;
        let mut analyzed = 0usize;
        for dataset in &context.datasets {
            let Some(readme) = self.host.fetch_readme(dataset) else {
                // A linked dataset with no retrievable card contributes
                // nothing, but still counts toward the average.
                analyzed += 1;
                continue;
            };
            let metadata = self.host.fetch_metadata(dataset);
            total += field_score(&readme, metadata.as_ref());
            analyzed += 1;
        }

        if analyzed == 0 {
            return context
                .readme
                .as_deref()
                .map_or(missing, |readme| field_score(readme, None));
        }
        total / analyzed as f64
    }
}

impl MetricEvaluator for DatasetQuality {
    fn name(&self) -> &'static str {
        "dataset_quality"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| self.score(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

/// Fraction of the four quality fields the evidence satisfies.
fn field_score(readme: &str, metadata: Option<&HostMetadata>) -> f64 {
    let lower = readme.to_lowercase();
    let mut satisfied = 0u32;

    // 1. Description / overview
    if lower.contains("description") || lower.contains("overview") || readme.len() > 300 {
        satisfied += 1;
    }
    // 2. Size or sample counts
    if text::contains_any(&lower, SIZE_INDICATORS) {
        satisfied += 1;
    }
    // 3. License
    let licensed = lower.contains("license")
        || metadata.is_some_and(|m| m.license_tag().is_some());
    if licensed {
        satisfied += 1;
    }
    // 4. Benchmark / evaluation references
    if text::contains_any(&lower, BENCHMARK_INDICATORS) {
        satisfied += 1;
    }

    f64::from(satisfied) / 4.0
}
