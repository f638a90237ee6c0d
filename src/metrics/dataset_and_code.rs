//! Dataset-and-code linkage metric.
//!
//! Checks whether the model has (a) dataset evidence — an explicitly linked
//! dataset, dataset-indicating README keywords, or a structured model index —
//! and (b) code evidence — a linked repository, code-indicating README
//! keywords, or example/script files in the listing. Both → 1.0, one → 0.5,
//! neither → the configured low default.

use crate::config::ScoringConfig;
use crate::metrics::{text, MetricEvaluator};
use crate::model::{MetricOutcome, ModelContext};

const DATASET_INDICATORS: &[&str] = &[
    "dataset:",
    "training data",
    "trained on",
    "train on",
    "huggingface.co/datasets/",
    "dataset link",
    "data source",
];

const CODE_INDICATORS: &[&str] = &[
    "training script",
    "train.py",
    "fine-tune",
    "finetune",
    "example code",
    "training code",
    "github.com/",
    "colab",
    "jupyter",
    "notebook",
];

pub struct DatasetAndCode;

impl MetricEvaluator for DatasetAndCode {
    fn name(&self) -> &'static str {
        "dataset_and_code_score"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| score_linkage(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

fn score_linkage(context: &ModelContext, config: &ScoringConfig) -> f64 {
    let readme_lower = context.readme_lower();

    let has_dataset = !context.datasets.is_empty()
        || text::contains_any(&readme_lower, DATASET_INDICATORS)
        || context
            .metadata
            .as_ref()
            .is_some_and(|m| m.model_index.is_some());

    let has_code = !context.code_repos.is_empty()
        || text::contains_any(&readme_lower, CODE_INDICATORS)
        || context.files().iter().any(|f| {
            let path = f.path.to_lowercase();
            path.ends_with(".py")
                || path.ends_with(".ipynb")
                || path.contains("train")
                || path.contains("example")
        });

    match (has_dataset, has_code) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.5,
        (false, false) => config.thresholds.dataset_and_code.neither_score,
    }
}
