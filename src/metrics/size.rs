//! Size / deployability metric.
//!
//! Estimates the model's size in gigabytes — from explicit README mentions,
//! else from weight-file sizes in the listing, else from naming conventions —
//! and scores it against each device class's capacity limit with a monotone
//! decreasing curve: 1.0 at or below the limit, linear falloff to 0 at
//! `overshoot_zero_ratio` times the limit.

use regex::Regex;

use crate::config::{ScoringConfig, SizeThresholds};
use crate::metrics::{text, MetricEvaluator};
use crate::model::{MetricOutcome, ModelContext, RepoFile, SizeScore};

/// File extensions treated as model weights.
const WEIGHT_EXTENSIONS: &[&str] = &[
    ".safetensors",
    ".bin",
    ".h5",
    ".onnx",
    ".gguf",
    ".pt",
    ".ckpt",
    ".msgpack",
    ".pb",
];

pub struct SizeFit;

impl MetricEvaluator for SizeFit {
    fn name(&self) -> &'static str {
        "size_score"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (scores, latency_ms) = super::timed(|| {
            let thresholds = &config.thresholds.size;
            let size_gb = estimate_model_size_gb(context, thresholds);
            SizeScore::new(
                device_score(size_gb, thresholds.raspberry_pi_gb, thresholds),
                device_score(size_gb, thresholds.jetson_nano_gb, thresholds),
                device_score(size_gb, thresholds.desktop_pc_gb, thresholds),
                device_score(size_gb, thresholds.aws_server_gb, thresholds),
            )
        });
        MetricOutcome::per_device(scores, latency_ms)
    }
}

/// Single size estimate for the model, in gigabytes.
fn estimate_model_size_gb(context: &ModelContext, thresholds: &SizeThresholds) -> f64 {
    if let Some(size) = context.readme.as_deref().and_then(text::estimate_size_gb) {
        return size;
    }
    if let Some(size) = weight_files_size_gb(context.files()) {
        return size;
    }
    name_heuristic_gb(&context.model.name, thresholds)
}

/// Sum of reported weight-file sizes, when the listing carries any.
fn weight_files_size_gb(files: &[RepoFile]) -> Option<f64> {
    let total_bytes: u64 = files
        .iter()
        .filter(|f| {
            let path = f.path.to_lowercase();
            WEIGHT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        })
        .filter_map(|f| f.size)
        .sum();
    if total_bytes == 0 {
        return None;
    }
    Some(total_bytes as f64 / (1024.0 * 1024.0 * 1024.0))
}

/// Last-resort estimate from naming conventions.
fn name_heuristic_gb(name: &str, thresholds: &SizeThresholds) -> f64 {
    let lower = name.to_lowercase();
    let param_pattern =
        Regex::new(r"(\d+(?:\.\d+)?)\s*b\b").expect("static pattern compiles");
    if let Some(captures) = param_pattern.captures(&lower) {
        if let Some(value) = captures.get(1).and_then(|m| m.as_str().parse::<f64>().ok()) {
            return value * 2.0;
        }
    }
    if lower.contains("xxl") || lower.contains("xl") || lower.contains("large") {
        return 4.0;
    }
    if lower.contains("small") || lower.contains("tiny") || lower.contains("mini") {
        return 0.5;
    }
    thresholds.default_estimate_gb
}

/// Monotone decreasing per-device score.
fn device_score(size_gb: f64, limit_gb: f64, thresholds: &SizeThresholds) -> f64 {
    if limit_gb <= 0.0 {
        return 0.0;
    }
    let ratio = size_gb / limit_gb;
    if ratio <= 1.0 {
        return 1.0;
    }
    let zero_at = thresholds.overshoot_zero_ratio.max(1.0 + f64::EPSILON);
    (1.0 - (ratio - 1.0) / (zero_at - 1.0)).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        HostMetadata, Platform, ResourceCategory, ResourceReference,
    };

    fn context(name: &str, readme: Option<&str>, files: Vec<RepoFile>) -> ModelContext {
        let mut ctx = ModelContext::new(
            ResourceReference {
                url: format!("https://huggingface.co/org/{name}"),
                category: ResourceCategory::Model,
                name: name.to_string(),
                platform: Platform::HuggingFace,
                owner: Some("org".to_string()),
                repo: Some(name.to_string()),
            },
            vec![],
            vec![],
        );
        ctx.readme = readme.map(str::to_string);
        if !files.is_empty() {
            ctx.metadata = Some(HostMetadata {
                files,
                ..HostMetadata::default()
            });
        }
        ctx
    }

    #[test]
    fn test_readme_estimate_wins() {
        let thresholds = SizeThresholds::default();
        let ctx = context("model-x", Some("A 7B parameter model."), vec![]);
        assert_eq!(estimate_model_size_gb(&ctx, &thresholds), 14.0);
    }

    #[test]
    fn test_weight_file_sum_used_when_no_readme_signal() {
        let thresholds = SizeThresholds::default();
        let gib = 1024 * 1024 * 1024;
        let ctx = context(
            "model-x",
            Some("No size talk here."),
            vec![
                RepoFile::sized("model-00001.safetensors", 3 * gib),
                RepoFile::sized("model-00002.safetensors", gib),
                RepoFile::sized("README.md", 4096),
            ],
        );
        assert_eq!(estimate_model_size_gb(&ctx, &thresholds), 4.0);
    }

    #[test]
    fn test_name_heuristics() {
        let thresholds = SizeThresholds::default();
        assert_eq!(name_heuristic_gb("llama-7b", &thresholds), 14.0);
        assert_eq!(name_heuristic_gb("t5-large", &thresholds), 4.0);
        assert_eq!(name_heuristic_gb("bert-small", &thresholds), 0.5);
        assert_eq!(name_heuristic_gb("mystery-model", &thresholds), 2.0);
    }

    #[test]
    fn test_device_scores_monotone_decreasing() {
        let thresholds = SizeThresholds::default();
        let limit = 8.0;
        let at_limit = device_score(8.0, limit, &thresholds);
        let at_twice = device_score(16.0, limit, &thresholds);
        let at_five_times = device_score(40.0, limit, &thresholds);
        assert_eq!(at_limit, 1.0);
        assert!(at_limit >= at_twice);
        assert!(at_twice >= at_five_times);
        assert_eq!(at_five_times, 0.0);
    }

    #[test]
    fn test_small_model_fits_everywhere() {
        let config = ScoringConfig::default();
        let ctx = context("bert-tiny", Some("A 400 MB checkpoint."), vec![]);
        let outcome = SizeFit.compute(&ctx, &config);
        match outcome.value {
            crate::model::MetricValue::PerDevice(s) => {
                assert_eq!(s.raspberry_pi, 1.0);
                assert_eq!(s.aws_server, 1.0);
            }
            crate::model::MetricValue::Scalar(_) => panic!("size metric must be per-device"),
        }
    }

    #[test]
    fn test_huge_model_fails_edge_devices() {
        let config = ScoringConfig::default();
        let ctx = context("big", Some("A 70B parameter model."), vec![]);
        let outcome = SizeFit.compute(&ctx, &config);
        match outcome.value {
            crate::model::MetricValue::PerDevice(s) => {
                assert_eq!(s.raspberry_pi, 0.0);
                assert_eq!(s.jetson_nano, 0.0);
                assert!(s.aws_server > 0.0);
            }
            crate::model::MetricValue::Scalar(_) => panic!("size metric must be per-device"),
        }
    }
}
