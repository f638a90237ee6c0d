//! The unit of scoring work: one model plus its linked evidence.

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::resource::ResourceReference;

/// One entry in a hosting platform's file listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoFile {
    /// Path relative to the repository root
    pub path: String,
    /// On-disk size in bytes, when the hosting API reports one
    pub size: Option<u64>,
}

impl RepoFile {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size: None,
        }
    }

    #[must_use]
    pub fn sized(path: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            size: Some(size),
        }
    }
}

/// Structured metadata fetched from the hosting API for one resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostMetadata {
    pub downloads: u64,
    pub likes: u64,
    pub tags: Vec<String>,
    pub files: Vec<RepoFile>,
    /// Structured evaluation index from the model card, when present
    pub model_index: Option<serde_json::Value>,
    pub last_modified: Option<DateTime<Utc>>,
}

impl HostMetadata {
    /// Look up a `license:<id>` tag and return the identifier part.
    #[must_use]
    pub fn license_tag(&self) -> Option<&str> {
        self.tags
            .iter()
            .find_map(|tag| tag.strip_prefix("license:"))
            .filter(|id| !id.is_empty())
    }
}

/// The evidence bundle scored as one unit.
///
/// Created by context building, enriched exactly once (sequentially, before
/// any metric runs), then read-only for the concurrent metric fan-out.
#[derive(Debug, Clone)]
pub struct ModelContext {
    /// The model being audited
    pub model: ResourceReference,
    /// Linked dataset references, in input order
    pub datasets: Vec<ResourceReference>,
    /// Linked code repository references, in input order
    pub code_repos: Vec<ResourceReference>,

    // Enrichment fields, populated once by the orchestrator
    /// Hosting-API metadata for the model itself
    pub metadata: Option<HostMetadata>,
    /// Model README / model card full text
    pub readme: Option<String>,
    /// Parsed configuration documents keyed by file name
    pub config_docs: IndexMap<String, serde_json::Value>,
}

impl ModelContext {
    /// Create an un-enriched context for a model and its linked resources.
    #[must_use]
    pub fn new(
        model: ResourceReference,
        datasets: Vec<ResourceReference>,
        code_repos: Vec<ResourceReference>,
    ) -> Self {
        Self {
            model,
            datasets,
            code_repos,
            metadata: None,
            readme: None,
            config_docs: IndexMap::new(),
        }
    }

    /// README text lowercased for keyword scanning, empty if absent.
    #[must_use]
    pub fn readme_lower(&self) -> String {
        self.readme.as_deref().unwrap_or("").to_lowercase()
    }

    /// File listing from host metadata, empty if none was fetched.
    #[must_use]
    pub fn files(&self) -> &[RepoFile] {
        self.metadata.as_ref().map_or(&[], |m| m.files.as_slice())
    }
}
