//! Serde types for hub API responses.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::model::{HostMetadata, RepoFile};

/// One file entry in a hub repository listing.
#[derive(Debug, Clone, Deserialize)]
pub struct HubSibling {
    pub rfilename: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Repository info returned by `/api/models/{id}` and `/api/datasets/{id}`.
///
/// Only the fields the scoring engine consumes are deserialized; everything
/// else in the payload is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HubRepoInfo {
    #[serde(default)]
    pub downloads: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub siblings: Vec<HubSibling>,
    #[serde(default, rename = "cardData")]
    pub card_data: Option<serde_json::Value>,
    #[serde(default, rename = "lastModified")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl HubRepoInfo {
    /// Flatten into the host-agnostic metadata record.
    #[must_use]
    pub fn into_metadata(self) -> HostMetadata {
        let model_index = self
            .card_data
            .as_ref()
            .and_then(|card| card.get("model-index"))
            .filter(|v| !v.is_null())
            .cloned();

        HostMetadata {
            downloads: self.downloads,
            likes: self.likes,
            tags: self.tags,
            files: self
                .siblings
                .into_iter()
                .map(|s| RepoFile {
                    path: s.rfilename,
                    size: s.size,
                })
                .collect(),
            model_index,
            last_modified: self.last_modified,
        }
    }
}
