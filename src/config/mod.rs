//! Scoring configuration: metric weights and heuristic thresholds.
//!
//! A [`ScoringConfig`] is loaded once at orchestrator construction and stays
//! immutable for the run. Absence or malformation of the config file falls
//! back to built-in defaults rather than failing.

pub mod file;
mod types;

pub use file::{discover_config_file, load_config_file, load_or_default};
pub use types::{
    BusFactorThresholds, CodeQualityThresholds, DatasetCodeThresholds, DatasetQualityThresholds,
    LicenseThresholds, MetricWeights, PerformanceThresholds, RampUpThresholds, ScoringConfig,
    SizeAggregation, SizeThresholds, Thresholds,
};

/// Generate an example YAML config documenting the tunable surface.
#[must_use]
pub fn generate_example_config() -> String {
    let mut out = String::from(
        "# model-audit configuration\n\
         # Weights need not sum to 1; the net score is a weighted average\n\
         # normalized by the total weight actually applied.\n",
    );
    let defaults = ScoringConfig::default();
    match serde_yaml::to_string(&defaults) {
        Ok(yaml) => out.push_str(&yaml),
        Err(e) => {
            // Defaults always serialize; this arm exists for completeness.
            tracing::error!("could not serialize default config: {e}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_example_config_round_trips() {
        let example = generate_example_config();
        let parsed: ScoringConfig = serde_yaml::from_str(&example).expect("example parses");
        assert!(parsed.validate().is_ok());
        assert_eq!(parsed.weights.license, 1.0);
    }
}
