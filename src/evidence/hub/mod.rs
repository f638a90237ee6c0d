//! Hub-backed evidence provider.
//!
//! Implements [`ModelHost`] against the Hugging Face hub REST API. All trait
//! operations map failures to `None` after logging; transport and parse errors
//! never cross the provider boundary.

mod client;
mod response;

pub use client::{HubClient, HubClientConfig};
pub use response::{HubRepoInfo, HubSibling};

use crate::evidence::{ConfigDocs, ModelHost};
use crate::model::{HostMetadata, ResourceCategory, ResourceReference};

/// README file names probed in order.
const README_CANDIDATES: &[&str] = &["README.md", "readme.md"];

/// Configuration documents fetched during enrichment.
const CONFIG_CANDIDATES: &[&str] = &["config.json", "model_index.json"];

impl HubClient {
    fn is_hub_resource(reference: &ResourceReference) -> Option<(String, bool)> {
        if reference.platform != crate::model::Platform::HuggingFace {
            return None;
        }
        let repo_id = reference.repo_id()?;
        Some((repo_id, reference.category == ResourceCategory::Dataset))
    }
}

impl ModelHost for HubClient {
    fn fetch_readme(&self, reference: &ResourceReference) -> Option<String> {
        let (repo_id, is_dataset) = Self::is_hub_resource(reference)?;
        for candidate in README_CANDIDATES {
            match self.raw_file(&repo_id, is_dataset, candidate) {
                Ok(text) if !text.is_empty() => return Some(text),
                Ok(_) => {}
                Err(e) => tracing::debug!("no {candidate} for {repo_id}: {e}"),
            }
        }
        None
    }

    fn fetch_metadata(&self, reference: &ResourceReference) -> Option<HostMetadata> {
        let (repo_id, is_dataset) = Self::is_hub_resource(reference)?;
        match self.repo_info(&repo_id, is_dataset) {
            Ok(info) => Some(info.into_metadata()),
            Err(e) => {
                tracing::warn!("could not fetch metadata for {repo_id}: {e}");
                None
            }
        }
    }

    fn fetch_config(&self, reference: &ResourceReference) -> Option<ConfigDocs> {
        let (repo_id, is_dataset) = Self::is_hub_resource(reference)?;
        let mut docs = ConfigDocs::new();
        for candidate in CONFIG_CANDIDATES {
            let Ok(text) = self.raw_file(&repo_id, is_dataset, candidate) else {
                continue;
            };
            match serde_json::from_str(&text) {
                Ok(value) => {
                    docs.insert((*candidate).to_string(), value);
                }
                Err(e) => tracing::debug!("could not parse {candidate} for {repo_id}: {e}"),
            }
        }
        if docs.is_empty() {
            None
        } else {
            Some(docs)
        }
    }

    fn name(&self) -> &'static str {
        "hub"
    }
}
