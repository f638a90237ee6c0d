//! Score-carrying value records and the flattened output shape.

use serde::{Deserialize, Serialize};

/// Clamp a raw score into [0,1]; non-finite values map to 0.
#[must_use]
pub fn clamp_score(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Per-device-class size sub-scores.
///
/// Field names are the wire names; they map to the smallest-edge, small-edge,
/// desktop and server device tiers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizeScore {
    pub raspberry_pi: f64,
    pub jetson_nano: f64,
    pub desktop_pc: f64,
    pub aws_server: f64,
}

impl SizeScore {
    /// Construct with each sub-score clamped into [0,1].
    #[must_use]
    pub fn new(raspberry_pi: f64, jetson_nano: f64, desktop_pc: f64, aws_server: f64) -> Self {
        Self {
            raspberry_pi: clamp_score(raspberry_pi),
            jetson_nano: clamp_score(jetson_nano),
            desktop_pc: clamp_score(desktop_pc),
            aws_server: clamp_score(aws_server),
        }
    }

    /// All four sub-scores at zero.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            raspberry_pi: 0.0,
            jetson_nano: 0.0,
            desktop_pc: 0.0,
            aws_server: 0.0,
        }
    }

    /// Arithmetic mean of the four sub-scores.
    #[must_use]
    pub fn mean(&self) -> f64 {
        (self.raspberry_pi + self.jetson_nano + self.desktop_pc + self.aws_server) / 4.0
    }

    /// Maximum of the four sub-scores.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.raspberry_pi
            .max(self.jetson_nano)
            .max(self.desktop_pc)
            .max(self.aws_server)
    }
}

/// A metric's raw result: a scalar for most metrics, a per-device record for
/// the size metric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Scalar(f64),
    PerDevice(SizeScore),
}

/// Bounded score plus the wall-clock time spent computing it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricOutcome {
    pub value: MetricValue,
    pub latency_ms: u64,
}

impl MetricOutcome {
    /// Scalar outcome with the score clamped into [0,1].
    #[must_use]
    pub fn scalar(score: f64, latency_ms: u64) -> Self {
        Self {
            value: MetricValue::Scalar(clamp_score(score)),
            latency_ms,
        }
    }

    /// Per-device outcome (size metric only).
    #[must_use]
    pub const fn per_device(scores: SizeScore, latency_ms: u64) -> Self {
        Self {
            value: MetricValue::PerDevice(scores),
            latency_ms,
        }
    }

    /// The degraded default used when an evaluator fails outright.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            value: MetricValue::Scalar(0.0),
            latency_ms: 0,
        }
    }
}

/// Flattened audit record — the only externally observable artifact of a
/// scored model, emitted as one NDJSON line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[must_use]
pub struct AuditRecord {
    pub name: String,
    /// Always `"MODEL"` regardless of evidence
    pub category: String,
    pub net_score: f64,
    pub net_score_latency: u64,

    pub ramp_up_time: f64,
    pub ramp_up_time_latency: u64,

    pub bus_factor: f64,
    pub bus_factor_latency: u64,

    pub performance_claims: f64,
    pub performance_claims_latency: u64,

    pub license: f64,
    pub license_latency: u64,

    pub size_score: SizeScore,
    pub size_score_latency: u64,

    pub dataset_and_code_score: f64,
    pub dataset_and_code_score_latency: u64,

    pub dataset_quality: f64,
    pub dataset_quality_latency: u64,

    pub code_quality: f64,
    pub code_quality_latency: u64,
}

impl AuditRecord {
    /// Check the range invariant on every score field.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let scalars = [
            self.net_score,
            self.ramp_up_time,
            self.bus_factor,
            self.performance_claims,
            self.license,
            self.dataset_and_code_score,
            self.dataset_quality,
            self.code_quality,
            self.size_score.raspberry_pi,
            self.size_score.jetson_nano,
            self.size_score.desktop_pc,
            self.size_score.aws_server,
        ];
        scalars.iter().all(|s| (0.0..=1.0).contains(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_score_bounds() {
        assert_eq!(clamp_score(0.5), 0.5);
        assert_eq!(clamp_score(-0.1), 0.0);
        assert_eq!(clamp_score(1.7), 1.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(f64::INFINITY), 0.0);
    }

    #[test]
    fn test_size_score_clamps_at_construction() {
        let s = SizeScore::new(-0.2, 0.5, 1.0, 3.0);
        assert_eq!(s.raspberry_pi, 0.0);
        assert_eq!(s.jetson_nano, 0.5);
        assert_eq!(s.desktop_pc, 1.0);
        assert_eq!(s.aws_server, 1.0);
    }

    #[test]
    fn test_size_score_mean_and_max() {
        let s = SizeScore::new(0.0, 0.5, 1.0, 0.5);
        assert!((s.mean() - 0.5).abs() < 1e-9);
        assert!((s.max() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_scalar_outcome_clamps() {
        let o = MetricOutcome::scalar(1.5, 12);
        assert_eq!(o.value, MetricValue::Scalar(1.0));
        assert_eq!(o.latency_ms, 12);
    }

    #[test]
    fn test_record_serializes_with_expanded_size_score() {
        let record = AuditRecord {
            name: "bert-tiny".to_string(),
            category: "MODEL".to_string(),
            net_score: 0.5,
            net_score_latency: 3,
            ramp_up_time: 0.25,
            ramp_up_time_latency: 0,
            bus_factor: 0.0,
            bus_factor_latency: 0,
            performance_claims: 0.1,
            performance_claims_latency: 0,
            license: 0.3,
            license_latency: 0,
            size_score: SizeScore::new(1.0, 1.0, 1.0, 1.0),
            size_score_latency: 1,
            dataset_and_code_score: 0.1,
            dataset_and_code_score_latency: 0,
            dataset_quality: 0.3,
            dataset_quality_latency: 0,
            code_quality: 0.4,
            code_quality_latency: 0,
        };
        assert!(record.is_valid());

        let json = serde_json::to_value(&record).expect("record serializes");
        assert_eq!(json["category"], "MODEL");
        assert_eq!(json["size_score"]["raspberry_pi"], 1.0);
        assert_eq!(json["size_score_latency"], 1);
        assert!(json.get("size_score").expect("size_score").is_object());
    }
}
