//! Bus-factor metric.
//!
//! Contributor diversity of the linked code repository, scaled as
//! `min(1, unique_authors / saturation)`. Without contributor data the score
//! falls back to an engagement-based contributor estimate from hosting
//! downloads and likes, keeping the same saturation shape.

use std::sync::Arc;

use crate::config::ScoringConfig;
use crate::evidence::RepoSummarySource;
use crate::metrics::MetricEvaluator;
use crate::model::{HostMetadata, MetricOutcome, ModelContext};

pub struct BusFactor {
    miner: Arc<dyn RepoSummarySource>,
}

impl BusFactor {
    #[must_use]
    pub fn new(miner: Arc<dyn RepoSummarySource>) -> Self {
        Self { miner }
    }

    fn score(&self, context: &ModelContext, config: &ScoringConfig) -> f64 {
        let thresholds = &config.thresholds.bus_factor;
        let saturation = thresholds.author_saturation.max(1.0);

        for repo in context.code_repos.iter().take(thresholds.max_repos) {
            if let Some(summary) = self.miner.fetch_repo_summary(repo) {
                if summary.unique_authors > 0 {
                    let authors = summary.unique_authors as f64;
                    return (authors / saturation).min(1.0);
                }
            }
        }

        let estimated = context
            .metadata
            .as_ref()
            .map_or(0.0, estimate_contributors);
        (estimated / saturation).min(1.0)
    }
}

impl MetricEvaluator for BusFactor {
    fn name(&self) -> &'static str {
        "bus_factor"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| self.score(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

/// Estimate a contributor count from community engagement.
///
/// Higher engagement implies a larger maintaining group; the tiers mirror
/// download/like magnitudes rather than any exact relationship.
fn estimate_contributors(metadata: &HostMetadata) -> f64 {
    let from_downloads = match metadata.downloads {
        d if d > 100_000 => 3.0,
        d if d > 10_000 => 2.0,
        d if d > 1_000 => 1.5,
        d if d > 100 => 1.0,
        d if d > 0 => 0.5,
        _ => 0.0,
    };
    let from_likes = match metadata.likes {
        l if l > 100 => 2.0,
        l if l > 50 => 1.0,
        l if l > 10 => 0.5,
        l if l > 0 => 0.25,
        _ => 0.0,
    };
    from_downloads + from_likes
}
