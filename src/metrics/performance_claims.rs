//! Performance-claims metric.
//!
//! Tiered heuristic over README text. Explicit denials score lowest;
//! benchmark mentions backed by reproducibility material score highest, with
//! cited and detailed results in between.

use crate::config::ScoringConfig;
use crate::metrics::{text, MetricEvaluator};
use crate::model::{MetricOutcome, ModelContext};

const BENCHMARK_KEYWORDS: &[&str] = &[
    "benchmark",
    "evaluation",
    "eval results",
    "accuracy",
    "f1",
    "bleu",
    "rouge",
    "perplexity",
    "leaderboard",
    "glue",
    "squad",
    "mmlu",
];

const DENIAL_PHRASES: &[&str] = &["no benchmark", "no evaluation"];

const REPRODUCIBILITY_MARKERS: &[&str] = &[
    "reproduce",
    "training script",
    "train.py",
    "eval.py",
    ".ipynb",
    "notebook",
    "colab",
];

pub struct PerformanceClaims;

impl MetricEvaluator for PerformanceClaims {
    fn name(&self) -> &'static str {
        "performance_claims"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| score_claims(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

fn score_claims(context: &ModelContext, config: &ScoringConfig) -> f64 {
    let thresholds = &config.thresholds.performance;
    let readme_lower = context.readme_lower();

    if text::contains_any(&readme_lower, DENIAL_PHRASES) {
        return thresholds.denial_score;
    }

    let benchmark_mentions = text::count_present(&readme_lower, BENCHMARK_KEYWORDS);
    // A structured model index counts as a benchmark mention: it is exactly
    // an evaluation-results table in machine-readable form.
    let has_model_index = context
        .metadata
        .as_ref()
        .is_some_and(|m| m.model_index.is_some());

    if benchmark_mentions == 0 && !has_model_index {
        return thresholds.missing_score;
    }

    if text::contains_any(&readme_lower, REPRODUCIBILITY_MARKERS) {
        return thresholds.reproducible_score;
    }

    let cited = text::has_citation(&readme_lower);
    let detailed = has_model_index
        || text::has_results_table(&readme_lower)
        || text::has_numeric_results(&readme_lower);

    if benchmark_mentions >= 2 && cited && detailed {
        return thresholds.detailed_score;
    }
    if cited {
        return thresholds.cited_score;
    }

    thresholds.vague_score
}
