//! Ramp-up ease metric.
//!
//! Four equally weighted checks against the README: presence, installation
//! instructions, training/evaluation examples, and usage/API examples, with a
//! small bonus when the file listing ships example or tutorial material.

use crate::config::ScoringConfig;
use crate::metrics::{text, MetricEvaluator};
use crate::model::{MetricOutcome, ModelContext};

const CRITERIA: f64 = 4.0;

const INSTALL_INDICATORS: &[&str] = &[
    "install",
    "pip install",
    "conda install",
    "npm install",
    "setup",
    "installation",
    "getting started",
    "requirements",
    "dependencies",
];

const TRAINING_INDICATORS: &[&str] = &[
    "training",
    "train",
    "fine-tuning",
    "fine tuning",
    "finetune",
    "evaluation",
    "eval",
    "benchmark",
    "validate",
];

const USAGE_INDICATORS: &[&str] = &[
    "usage",
    "example",
    "how to use",
    "quickstart",
    "tutorial",
    "from transformers",
    "import",
    "pipeline",
    "```python",
    "```py",
    "inference",
];

pub struct RampUpTime;

impl MetricEvaluator for RampUpTime {
    fn name(&self) -> &'static str {
        "ramp_up_time"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| score_ramp_up(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

fn score_ramp_up(context: &ModelContext, config: &ScoringConfig) -> f64 {
    let thresholds = &config.thresholds.ramp_up;

    let Some(readme) = context.readme.as_deref().filter(|r| !r.is_empty()) else {
        return thresholds.missing_readme_score;
    };
    let readme_lower = readme.to_lowercase();

    let mut score = 1.0 / CRITERIA; // README exists
    if text::contains_any(&readme_lower, INSTALL_INDICATORS) {
        score += 1.0 / CRITERIA;
    }
    if text::contains_any(&readme_lower, TRAINING_INDICATORS) {
        score += 1.0 / CRITERIA;
    }
    if text::contains_any(&readme_lower, USAGE_INDICATORS) {
        score += 1.0 / CRITERIA;
    }

    let has_example_files = context.files().iter().any(|f| {
        let path = f.path.to_lowercase();
        path.contains("example")
            || path.contains("tutorial")
            || path.contains("notebook")
            || path.ends_with(".ipynb")
    });
    if has_example_files {
        score += thresholds.example_bonus;
    }

    score.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        HostMetadata, Platform, RepoFile, ResourceCategory, ResourceReference,
    };

    fn context(readme: Option<&str>, files: Vec<&str>) -> ModelContext {
        let mut ctx = ModelContext::new(
            ResourceReference {
                url: "https://huggingface.co/org/m".to_string(),
                category: ResourceCategory::Model,
                name: "m".to_string(),
                platform: Platform::HuggingFace,
                owner: Some("org".to_string()),
                repo: Some("m".to_string()),
            },
            vec![],
            vec![],
        );
        ctx.readme = readme.map(str::to_string);
        if !files.is_empty() {
            ctx.metadata = Some(HostMetadata {
                files: files.into_iter().map(RepoFile::new).collect(),
                ..HostMetadata::default()
            });
        }
        ctx
    }

    fn score(readme: Option<&str>, files: Vec<&str>) -> f64 {
        score_ramp_up(&context(readme, files), &ScoringConfig::default())
    }

    #[test]
    fn test_no_readme_short_circuits() {
        assert_eq!(score(None, vec![]), 0.1);
        assert_eq!(score(Some(""), vec![]), 0.1);
    }

    #[test]
    fn test_bare_readme_scores_presence_only() {
        let s = score(Some("A model."), vec![]);
        assert!((s - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_rich_readme_scores_high() {
        let readme = "# Model\n\n## Quickstart\npip install transformers\n\n\
                      ## Usage\n```python\nfrom transformers import pipeline\n```\n\n\
                      ## Training\nFine-tuning examples below.\n";
        assert!(score(Some(readme), vec![]) > 0.7);
    }

    #[test]
    fn test_example_file_bonus_caps_at_one() {
        let readme = "install usage example training evaluation import";
        let s = score(Some(readme), vec!["notebooks/demo.ipynb"]);
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_example_bonus_applies() {
        let s_without = score(Some("A model."), vec![]);
        let s_with = score(Some("A model."), vec!["examples/run.py"]);
        assert!((s_with - s_without - 0.1).abs() < 1e-9);
    }
}
