//! Evidence provider boundary.
//!
//! The scoring core consumes three read operations: README text, structured
//! hosting metadata, and git-mined repository summaries. Every operation
//! returns `None` on any failure — evidence providers never surface errors to
//! callers, so partial evidence is always scorable.
//!
//! The concrete network/git implementations live behind the `enrichment`
//! feature; [`OfflineHost`] and [`OfflineMiner`] are the null objects used
//! when enrichment is disabled and in tests.

use std::path::PathBuf;

use crate::model::{HostMetadata, ResourceReference};
use indexmap::IndexMap;

#[cfg(feature = "enrichment")]
pub mod hub;
#[cfg(feature = "enrichment")]
pub mod repo;

#[cfg(feature = "enrichment")]
pub use hub::{HubClient, HubClientConfig};
#[cfg(feature = "enrichment")]
pub use repo::{MinerConfig, RepoMiner};

/// Parsed configuration documents keyed by file name.
pub type ConfigDocs = IndexMap<String, serde_json::Value>;

/// Read access to a model-hosting platform.
pub trait ModelHost: Send + Sync {
    /// Fetch README / model-card text for a resource.
    fn fetch_readme(&self, reference: &ResourceReference) -> Option<String>;

    /// Fetch structured hosting metadata for a resource.
    fn fetch_metadata(&self, reference: &ResourceReference) -> Option<HostMetadata>;

    /// Fetch and parse the resource's configuration documents.
    fn fetch_config(&self, reference: &ResourceReference) -> Option<ConfigDocs>;

    /// Provider name used in log lines.
    fn name(&self) -> &'static str;
}

/// Summarized facts mined from a code repository's history and tree.
///
/// The scoring core consumes this summary; commit-graph traversal mechanics
/// stay on the provider side of the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoSummary {
    /// Distinct commit authors observed in the walked history
    pub unique_authors: usize,
    /// Commits walked (capped by the miner)
    pub total_commits: usize,
    /// Commits within the recency window
    pub recent_commits: usize,
    /// A `tests/` or `test/` directory exists at the root
    pub has_tests: bool,
    /// CI configuration exists (workflow dir or known CI files)
    pub has_ci: bool,
    /// Source files counted in the bounded tree survey
    pub source_files: usize,
    /// Local checkout, available for deeper per-file analysis
    pub checkout: Option<PathBuf>,
}

/// Read access to git-mined repository summaries.
pub trait RepoSummarySource: Send + Sync {
    /// Fetch (cloning if necessary) and summarize a code repository.
    fn fetch_repo_summary(&self, reference: &ResourceReference) -> Option<RepoSummary>;

    /// Provider name used in log lines.
    fn name(&self) -> &'static str;
}

/// Null-object host used when enrichment is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineHost;

impl OfflineHost {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ModelHost for OfflineHost {
    fn fetch_readme(&self, _reference: &ResourceReference) -> Option<String> {
        None
    }

    fn fetch_metadata(&self, _reference: &ResourceReference) -> Option<HostMetadata> {
        None
    }

    fn fetch_config(&self, _reference: &ResourceReference) -> Option<ConfigDocs> {
        None
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

/// Null-object miner used when enrichment is disabled or unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineMiner;

impl OfflineMiner {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl RepoSummarySource for OfflineMiner {
    fn fetch_repo_summary(&self, _reference: &ResourceReference) -> Option<RepoSummary> {
        None
    }

    fn name(&self) -> &'static str {
        "offline"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Platform, ResourceCategory};

    fn code_ref() -> ResourceReference {
        ResourceReference {
            url: "https://github.com/org/repo".to_string(),
            category: ResourceCategory::Code,
            name: "org/repo".to_string(),
            platform: Platform::GitHub,
            owner: Some("org".to_string()),
            repo: Some("repo".to_string()),
        }
    }

    #[test]
    fn test_offline_host_returns_nothing() {
        let host = OfflineHost::new();
        assert_eq!(host.name(), "offline");
        assert!(host.fetch_readme(&code_ref()).is_none());
        assert!(host.fetch_metadata(&code_ref()).is_none());
        assert!(host.fetch_config(&code_ref()).is_none());
    }

    #[test]
    fn test_offline_miner_returns_nothing() {
        let miner = OfflineMiner::new();
        assert!(miner.fetch_repo_summary(&code_ref()).is_none());
    }
}
