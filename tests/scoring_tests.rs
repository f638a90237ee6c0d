//! Aggregation and resilience behavior of the scoring orchestrator.

use std::sync::Arc;

use model_audit::config::{MetricWeights, ScoringConfig};
use model_audit::evidence::{ConfigDocs, ModelHost, OfflineMiner};
use model_audit::model::{
    HostMetadata, MetricOutcome, ModelContext, Platform, ResourceCategory, ResourceReference,
};
use model_audit::{MetricEvaluator, ScoreOrchestrator};

fn model_context() -> ModelContext {
    ModelContext::new(
        ResourceReference {
            url: "https://huggingface.co/org/test-model".to_string(),
            category: ResourceCategory::Model,
            name: "test-model".to_string(),
            platform: Platform::HuggingFace,
            owner: Some("org".to_string()),
            repo: Some("test-model".to_string()),
        },
        vec![],
        vec![],
    )
}

// ============================================================================
// Weighted-average identity
// ============================================================================

struct FixedMetric {
    name: &'static str,
    score: f64,
}

impl MetricEvaluator for FixedMetric {
    fn name(&self) -> &'static str {
        self.name
    }

    fn compute(&self, _context: &ModelContext, _config: &ScoringConfig) -> MetricOutcome {
        MetricOutcome::scalar(self.score, 1)
    }
}

#[test]
fn net_score_is_weighted_average_identity() {
    // All 8 metrics forced to 0.7 under equal positive weights → net ≈ 0.7.
    let names = [
        "ramp_up_time",
        "bus_factor",
        "performance_claims",
        "license",
        "size_score",
        "dataset_and_code_score",
        "dataset_quality",
        "code_quality",
    ];
    let evaluators: Vec<Box<dyn MetricEvaluator>> = names
        .into_iter()
        .map(|name| Box::new(FixedMetric { name, score: 0.7 }) as Box<dyn MetricEvaluator>)
        .collect();

    let mut config = ScoringConfig::default();
    config.weights = MetricWeights::uniform(2.5); // equal, need not sum to 1

    let orchestrator = ScoreOrchestrator::with_evaluators(
        config,
        Arc::new(model_audit::OfflineHost),
        evaluators,
    );
    let record = orchestrator.audit(&model_context());
    assert!((record.net_score - 0.7).abs() < 1e-9);
    assert!(record.is_valid());
}

// ============================================================================
// Resilience: every evidence call fails
// ============================================================================

struct AlwaysPanicHost;

impl ModelHost for AlwaysPanicHost {
    fn fetch_readme(&self, _r: &ResourceReference) -> Option<String> {
        panic!("simulated provider failure");
    }

    fn fetch_metadata(&self, _r: &ResourceReference) -> Option<HostMetadata> {
        panic!("simulated provider failure");
    }

    fn fetch_config(&self, _r: &ResourceReference) -> Option<ConfigDocs> {
        panic!("simulated provider failure");
    }

    fn name(&self) -> &'static str {
        "always-panic"
    }
}

#[test]
fn enrichment_survives_total_provider_failure() {
    let orchestrator = ScoreOrchestrator::new(
        ScoringConfig::default(),
        Arc::new(AlwaysPanicHost),
        Arc::new(OfflineMiner),
    );

    let mut context = model_context();
    orchestrator.enrich(&mut context);
    assert!(context.metadata.is_none());
    assert!(context.readme.is_none());
    assert!(context.config_docs.is_empty());

    // Downstream metrics score the fallback paths and stay in range.
    let record = orchestrator.audit(&context);
    assert!(record.is_valid());
    assert_eq!(record.license, 0.3);
    assert_eq!(record.ramp_up_time, 0.1);
    assert_eq!(record.performance_claims, 0.1);
    assert_eq!(record.dataset_and_code_score, 0.1);
    assert_eq!(record.dataset_quality, 0.3);
    assert_eq!(record.code_quality, 0.4);
    assert_eq!(record.bus_factor, 0.0);
    // The default 2 GB estimate fits every device class.
    assert_eq!(record.size_score.raspberry_pi, 1.0);
    assert_eq!(record.size_score.aws_server, 1.0);
}

// ============================================================================
// Enrichment precedes fan-out
// ============================================================================

struct CannedHost;

impl ModelHost for CannedHost {
    fn fetch_readme(&self, _r: &ResourceReference) -> Option<String> {
        Some("## License\nMIT\n\n## Usage\npip install example\n".to_string())
    }

    fn fetch_metadata(&self, _r: &ResourceReference) -> Option<HostMetadata> {
        Some(HostMetadata {
            downloads: 20_000,
            likes: 15,
            tags: vec!["license:mit".to_string()],
            ..HostMetadata::default()
        })
    }

    fn fetch_config(&self, _r: &ResourceReference) -> Option<ConfigDocs> {
        let mut docs = ConfigDocs::new();
        docs.insert("config.json".to_string(), serde_json::json!({"hidden_size": 768}));
        Some(docs)
    }

    fn name(&self) -> &'static str {
        "canned"
    }
}

#[test]
fn enriched_evidence_flows_into_metrics() {
    let orchestrator = ScoreOrchestrator::new(
        ScoringConfig::default(),
        Arc::new(CannedHost),
        Arc::new(OfflineMiner),
    );

    let mut context = model_context();
    orchestrator.enrich(&mut context);
    assert!(context.metadata.is_some());
    assert!(context.readme.is_some());
    assert_eq!(context.config_docs.len(), 1);

    let record = orchestrator.audit(&context);
    assert_eq!(record.license, 1.0);
    assert!(record.ramp_up_time >= 0.5);
    assert!(record.bus_factor > 0.0);
    assert!(record.is_valid());
}
