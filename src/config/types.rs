//! Configuration types for the scoring engine.

use serde::{Deserialize, Serialize};

use crate::error::{AuditError, Result};

/// How the size metric's four device sub-scores fold into the net score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeAggregation {
    /// Arithmetic mean — favors broad deployability
    #[default]
    Mean,
    /// Maximum — favors best-case deployability
    Max,
}

/// Top-level scoring configuration.
///
/// Loaded once at orchestrator construction and never mutated during scoring.
/// Every field has a built-in default, so a partial config file only overrides
/// what it names.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Per-metric weights for the net score (need not sum to 1)
    pub weights: MetricWeights,
    /// Size sub-score folding strategy
    pub size_aggregation: SizeAggregation,
    /// Per-metric heuristic tuning
    pub thresholds: Thresholds,
}

impl ScoringConfig {
    /// Validate invariants a config file could violate.
    pub fn validate(&self) -> Result<()> {
        for (name, weight) in self.weights.iter() {
            if !weight.is_finite() || weight < 0.0 {
                return Err(AuditError::config(format!(
                    "weight for {name} must be a non-negative number, got {weight}"
                )));
            }
        }
        let size = &self.thresholds.size;
        for (device, limit) in [
            ("raspberry_pi", size.raspberry_pi_gb),
            ("jetson_nano", size.jetson_nano_gb),
            ("desktop_pc", size.desktop_pc_gb),
            ("aws_server", size.aws_server_gb),
        ] {
            if !(limit > 0.0) {
                return Err(AuditError::config(format!(
                    "size limit for {device} must be positive, got {limit}"
                )));
            }
        }
        if !(size.overshoot_zero_ratio > 1.0) {
            return Err(AuditError::config(format!(
                "overshoot_zero_ratio must exceed 1.0, got {}",
                size.overshoot_zero_ratio
            )));
        }
        for (name, score) in [
            ("license.missing_score", self.thresholds.license.missing_score),
            (
                "ramp_up.missing_readme_score",
                self.thresholds.ramp_up.missing_readme_score,
            ),
            (
                "dataset_quality.missing_score",
                self.thresholds.dataset_quality.missing_score,
            ),
            (
                "code_quality.missing_score",
                self.thresholds.code_quality.missing_score,
            ),
        ] {
            if !(0.0..=1.0).contains(&score) {
                return Err(AuditError::config(format!(
                    "{name} must be within [0,1], got {score}"
                )));
            }
        }
        Ok(())
    }
}

/// Per-metric weights, keyed by the evaluators' stable names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricWeights {
    pub ramp_up_time: f64,
    pub bus_factor: f64,
    pub performance_claims: f64,
    pub license: f64,
    pub size_score: f64,
    pub dataset_and_code_score: f64,
    pub dataset_quality: f64,
    pub code_quality: f64,
}

impl Default for MetricWeights {
    fn default() -> Self {
        Self {
            ramp_up_time: 1.0,
            bus_factor: 1.0,
            performance_claims: 1.0,
            license: 1.0,
            size_score: 1.0,
            dataset_and_code_score: 1.0,
            dataset_quality: 1.0,
            code_quality: 1.0,
        }
    }
}

impl MetricWeights {
    /// Weight registered for a metric name, `None` for unknown names.
    #[must_use]
    pub fn weight_for(&self, name: &str) -> Option<f64> {
        match name {
            "ramp_up_time" => Some(self.ramp_up_time),
            "bus_factor" => Some(self.bus_factor),
            "performance_claims" => Some(self.performance_claims),
            "license" => Some(self.license),
            "size_score" => Some(self.size_score),
            "dataset_and_code_score" => Some(self.dataset_and_code_score),
            "dataset_quality" => Some(self.dataset_quality),
            "code_quality" => Some(self.code_quality),
            _ => None,
        }
    }

    /// Iterate over `(name, weight)` pairs in registry order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> {
        [
            ("ramp_up_time", self.ramp_up_time),
            ("bus_factor", self.bus_factor),
            ("performance_claims", self.performance_claims),
            ("license", self.license),
            ("size_score", self.size_score),
            ("dataset_and_code_score", self.dataset_and_code_score),
            ("dataset_quality", self.dataset_quality),
            ("code_quality", self.code_quality),
        ]
        .into_iter()
    }

    /// Uniform weights, useful in tests and as a neutral baseline.
    #[must_use]
    pub fn uniform(weight: f64) -> Self {
        Self {
            ramp_up_time: weight,
            bus_factor: weight,
            performance_claims: weight,
            license: weight,
            size_score: weight,
            dataset_and_code_score: weight,
            dataset_quality: weight,
            code_quality: weight,
        }
    }
}

/// Nested per-metric tuning values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub license: LicenseThresholds,
    pub ramp_up: RampUpThresholds,
    pub bus_factor: BusFactorThresholds,
    pub performance: PerformanceThresholds,
    pub size: SizeThresholds,
    pub dataset_and_code: DatasetCodeThresholds,
    pub dataset_quality: DatasetQualityThresholds,
    pub code_quality: CodeQualityThresholds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LicenseThresholds {
    /// Score when no license token can be located
    pub missing_score: f64,
    /// Permissive license families, lowercase; short entries match whole
    /// words, longer ones match separator-stripped substrings
    pub permissive: Vec<String>,
    /// Score for the LGPL family
    pub weak_copyleft_score: f64,
    /// Score for the GPL/AGPL family
    pub copyleft_score: f64,
    /// Score for any other non-empty identifier
    pub unknown_score: f64,
}

impl Default for LicenseThresholds {
    fn default() -> Self {
        Self {
            missing_score: 0.3,
            permissive: vec![
                "mit".to_string(),
                "apache".to_string(),
                "bsd".to_string(),
                "isc".to_string(),
                "unlicense".to_string(),
            ],
            weak_copyleft_score: 0.8,
            copyleft_score: 0.7,
            unknown_score: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RampUpThresholds {
    /// Short-circuit score when no README exists
    pub missing_readme_score: f64,
    /// Bonus when the file listing contains example/tutorial material
    pub example_bonus: f64,
}

impl Default for RampUpThresholds {
    fn default() -> Self {
        Self {
            missing_readme_score: 0.1,
            example_bonus: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BusFactorThresholds {
    /// Author count at which the score saturates at 1.0
    pub author_saturation: f64,
    /// Linked code repositories inspected at most
    pub max_repos: usize,
}

impl Default for BusFactorThresholds {
    fn default() -> Self {
        Self {
            author_saturation: 5.0,
            max_repos: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceThresholds {
    /// Explicit "no benchmark / no evaluation" statement
    pub denial_score: f64,
    /// Benchmark mention plus reproducibility markers
    pub reproducible_score: f64,
    /// Multiple benchmarks, citation and detailed results
    pub detailed_score: f64,
    /// Benchmark plus citation
    pub cited_score: f64,
    /// Benchmark mention alone
    pub vague_score: f64,
    /// No benchmark signal at all
    pub missing_score: f64,
}

impl Default for PerformanceThresholds {
    fn default() -> Self {
        Self {
            denial_score: 0.05,
            reproducible_score: 1.0,
            detailed_score: 0.85,
            cited_score: 0.75,
            vague_score: 0.5,
            missing_score: 0.1,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeThresholds {
    /// Capacity limit per device class, in gigabytes
    pub raspberry_pi_gb: f64,
    pub jetson_nano_gb: f64,
    pub desktop_pc_gb: f64,
    pub aws_server_gb: f64,
    /// Multiple of the limit at which the device score reaches 0
    pub overshoot_zero_ratio: f64,
    /// Estimate used when no size signal exists at all
    pub default_estimate_gb: f64,
}

impl Default for SizeThresholds {
    fn default() -> Self {
        Self {
            raspberry_pi_gb: 2.0,
            jetson_nano_gb: 8.0,
            desktop_pc_gb: 32.0,
            aws_server_gb: 128.0,
            overshoot_zero_ratio: 4.0,
            default_estimate_gb: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetCodeThresholds {
    /// Score when neither a dataset nor code evidence is present
    pub neither_score: f64,
}

impl Default for DatasetCodeThresholds {
    fn default() -> Self {
        Self { neither_score: 0.1 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetQualityThresholds {
    /// Score when no datasets are linked and no README exists
    pub missing_score: f64,
}

impl Default for DatasetQualityThresholds {
    fn default() -> Self {
        Self { missing_score: 0.3 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeQualityThresholds {
    /// Score when no code repository is linked or clonable
    pub missing_score: f64,
    /// Error count at which the base score reaches 0
    pub error_budget: f64,
    /// Bonus for a tests directory
    pub tests_bonus: f64,
    /// Bonus for CI configuration
    pub ci_bonus: f64,
    /// Linked code repositories processed at most
    pub max_repos: usize,
    /// Source files sampled by the syntax fallback
    pub syntax_sample_cap: usize,
    /// Wall-clock limit for one analysis-tool invocation
    pub tool_timeout_secs: u64,
}

impl Default for CodeQualityThresholds {
    fn default() -> Self {
        Self {
            missing_score: 0.4,
            error_budget: 50.0,
            tests_bonus: 0.1,
            ci_bonus: 0.1,
            max_repos: 2,
            syntax_sample_cap: 20,
            tool_timeout_secs: 30,
        }
    }
}
