//! License clarity metric.
//!
//! Locates a license token either in structured hosting tags
//! (`license:<id>`) or in a README "License" section, then scores it by
//! family: permissive → 1.0, LGPL → 0.8, GPL/AGPL → 0.7, anything else
//! non-empty → ambiguous 0.5, missing → the configured low default.

use crate::config::ScoringConfig;
use crate::metrics::{text, MetricEvaluator};
use crate::model::{MetricOutcome, ModelContext};

pub struct License;

impl MetricEvaluator for License {
    fn name(&self) -> &'static str {
        "license"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| score_license(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

fn score_license(context: &ModelContext, config: &ScoringConfig) -> f64 {
    let thresholds = &config.thresholds.license;

    let token = context
        .metadata
        .as_ref()
        .and_then(|m| m.license_tag().map(str::to_string))
        .or_else(|| {
            context
                .readme
                .as_deref()
                .and_then(text::license_from_readme)
        });

    let Some(token) = token else {
        return thresholds.missing_score;
    };

    classify_token(&token, config)
}

/// Score a located license token by family.
fn classify_token(token: &str, config: &ScoringConfig) -> f64 {
    let thresholds = &config.thresholds.license;

    // Prefer an exact SPDX identifier when the token is one.
    let canonical = spdx::license_id(token.trim())
        .map(|id| id.name.to_string())
        .unwrap_or_else(|| token.to_string());
    let normalized = text::normalize_license_token(&canonical);
    let raw_lower = canonical.to_lowercase();

    if normalized.is_empty() {
        return thresholds.missing_score;
    }
    if thresholds
        .permissive
        .iter()
        .any(|p| permissive_match(&normalized, &raw_lower, p))
    {
        return 1.0;
    }
    if normalized.contains("lgpl") {
        return thresholds.weak_copyleft_score;
    }
    if normalized.contains("gpl") {
        // Covers GPL and AGPL once LGPL is ruled out.
        return thresholds.copyleft_score;
    }

    thresholds.unknown_score
}

/// Match one permissive-list entry against a license token.
///
/// Short identifiers like `mit` or `bsd` must match a whole word — a
/// substring check would hit words like "limited". Longer entries match as
/// substrings of the separator-stripped token.
fn permissive_match(normalized: &str, raw_lower: &str, entry: &str) -> bool {
    if entry.len() <= 4 {
        normalized == entry
            || raw_lower
                .split(|c: char| !c.is_ascii_alphanumeric())
                .any(|word| word == entry)
    } else {
        normalized.contains(entry)
    }
}
