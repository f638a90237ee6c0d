//! Literal-score scenarios for the metric evaluators.
//!
//! These pin the documented scoring tables: every scenario here is part of
//! the tool's observable contract, so the assertions are exact.

use std::sync::Arc;

use model_audit::config::ScoringConfig;
use model_audit::evidence::{OfflineHost, OfflineMiner};
use model_audit::metrics::{
    text, DatasetAndCode, License, MetricEvaluator, RampUpTime, SizeFit,
};
use model_audit::model::{
    MetricValue, ModelContext, Platform, ResourceCategory, ResourceReference,
};

// ============================================================================
// Context helpers
// ============================================================================

fn reference(category: ResourceCategory, name: &str) -> ResourceReference {
    let (platform, url) = match category {
        ResourceCategory::Code => (Platform::GitHub, format!("https://github.com/{name}")),
        ResourceCategory::Dataset => (
            Platform::HuggingFace,
            format!("https://huggingface.co/datasets/{name}"),
        ),
        ResourceCategory::Model => (
            Platform::HuggingFace,
            format!("https://huggingface.co/{name}"),
        ),
    };
    let parts: Vec<&str> = name.split('/').collect();
    ResourceReference {
        url,
        category,
        name: name.to_string(),
        platform,
        owner: parts.first().map(|s| (*s).to_string()),
        repo: parts.get(1).map(|s| (*s).to_string()),
    }
}

fn context_with_readme(readme: Option<&str>) -> ModelContext {
    let mut ctx = ModelContext::new(
        reference(ResourceCategory::Model, "org/test-model"),
        vec![],
        vec![],
    );
    ctx.readme = readme.map(str::to_string);
    ctx
}

fn scalar(evaluator: &dyn MetricEvaluator, ctx: &ModelContext) -> f64 {
    match evaluator.compute(ctx, &ScoringConfig::default()).value {
        MetricValue::Scalar(v) => v,
        MetricValue::PerDevice(_) => panic!("expected scalar metric"),
    }
}

// ============================================================================
// License
// ============================================================================

mod license {
    use super::*;

    #[test]
    fn mit_scores_full() {
        let ctx = context_with_readme(Some("## License\nMIT License\n"));
        assert_eq!(scalar(&License, &ctx), 1.0);
    }

    #[test]
    fn missing_scores_low_default() {
        let ctx = context_with_readme(None);
        assert_eq!(scalar(&License, &ctx), 0.3);
    }

    #[test]
    fn gpl_v3_scores_copyleft() {
        let ctx = context_with_readme(Some("## License\nGPL v3\n"));
        assert_eq!(scalar(&License, &ctx), 0.7);
    }
}

// ============================================================================
// Ramp-up
// ============================================================================

mod ramp_up {
    use super::*;

    #[test]
    fn no_readme_scores_low_default() {
        let ctx = context_with_readme(None);
        assert_eq!(scalar(&RampUpTime, &ctx), 0.1);
    }

    #[test]
    fn quickstart_usage_examples_score_high() {
        let readme = "# Model\n\n## Quickstart\npip install transformers\n\n\
                      ## Usage\n```python\nfrom transformers import pipeline\n```\n\n\
                      ## Examples\nTraining and evaluation walkthrough.\n";
        let ctx = context_with_readme(Some(readme));
        assert!(scalar(&RampUpTime, &ctx) > 0.7);
    }
}

// ============================================================================
// Size
// ============================================================================

mod size {
    use super::*;

    #[test]
    fn seven_b_estimates_fourteen_gigabytes() {
        assert_eq!(text::estimate_size_gb("7B parameter model"), Some(14.0));
    }

    #[test]
    fn device_scores_decrease_monotonically() {
        // 16 GB model: at/under desktop limit, 2x the jetson limit, 8x the
        // raspberry-pi limit.
        let ctx = context_with_readme(Some("Checkpoint size: 16GB"));
        let outcome = SizeFit.compute(&ctx, &ScoringConfig::default());
        let MetricValue::PerDevice(scores) = outcome.value else {
            panic!("size metric must be per-device");
        };
        assert_eq!(scores.desktop_pc, 1.0);
        assert!(scores.desktop_pc >= scores.jetson_nano);
        assert!(scores.jetson_nano >= scores.raspberry_pi);
        assert_eq!(scores.raspberry_pi, 0.0);
    }
}

// ============================================================================
// Dataset-and-code
// ============================================================================

mod dataset_and_code {
    use super::*;

    #[test]
    fn both_linked_scores_full() {
        let ctx = ModelContext::new(
            reference(ResourceCategory::Model, "org/test-model"),
            vec![reference(ResourceCategory::Dataset, "org/test-data")],
            vec![reference(ResourceCategory::Code, "org/test-code")],
        );
        assert_eq!(scalar(&DatasetAndCode, &ctx), 1.0);
    }

    #[test]
    fn one_dataset_zero_code_no_hints_scores_half() {
        let ctx = ModelContext::new(
            reference(ResourceCategory::Model, "org/test-model"),
            vec![reference(ResourceCategory::Dataset, "org/test-data")],
            vec![],
        );
        assert_eq!(scalar(&DatasetAndCode, &ctx), 0.5);
    }

    #[test]
    fn neither_scores_low_default() {
        let ctx = context_with_readme(None);
        assert_eq!(scalar(&DatasetAndCode, &ctx), 0.1);
    }
}

// ============================================================================
// Range invariant across the whole registry
// ============================================================================

#[test]
fn all_metrics_stay_bounded_on_default_evidence() {
    let evaluators = model_audit::metrics::standard_evaluators(
        Arc::new(OfflineHost),
        Arc::new(OfflineMiner),
    );
    let config = ScoringConfig::default();
    let ctx = context_with_readme(Some("## Usage\nA 3B model trained on GLUE, MIT licensed."));

    for evaluator in &evaluators {
        let outcome = evaluator.compute(&ctx, &config);
        match outcome.value {
            MetricValue::Scalar(v) => {
                assert!((0.0..=1.0).contains(&v), "{} out of range", evaluator.name());
            }
            MetricValue::PerDevice(s) => {
                for v in [s.raspberry_pi, s.jetson_nano, s.desktop_pc, s.aws_server] {
                    assert!((0.0..=1.0).contains(&v), "size sub-score out of range");
                }
            }
        }
    }
}
