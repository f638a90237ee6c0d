//! Resource references produced by URL classification.

use serde::{Deserialize, Serialize};

/// Category assigned to a classified URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResourceCategory {
    Model,
    Dataset,
    Code,
}

impl ResourceCategory {
    /// Wire label used in output records.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Model => "MODEL",
            Self::Dataset => "DATASET",
            Self::Code => "CODE",
        }
    }
}

/// Hosting platform a resource lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    HuggingFace,
    GitHub,
    Other,
}

impl Platform {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::GitHub => "github",
            Self::Other => "other",
        }
    }
}

/// A classified remote resource. Immutable once parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceReference {
    /// Original URL as given in the input file
    pub url: String,
    /// MODEL / DATASET / CODE
    pub category: ResourceCategory,
    /// Display name (repo name for models, `owner/repo` otherwise)
    pub name: String,
    /// Hosting platform
    pub platform: Platform,
    /// Repository owner, when the URL carries one
    pub owner: Option<String>,
    /// Repository name, when the URL carries one
    pub repo: Option<String>,
}

impl ResourceReference {
    /// `owner/repo` identifier used by hosting APIs, when both parts exist.
    #[must_use]
    pub fn repo_id(&self) -> Option<String> {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => Some(format!("{owner}/{repo}")),
            (None, Some(repo)) => Some(repo.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(owner: Option<&str>, repo: Option<&str>) -> ResourceReference {
        ResourceReference {
            url: "https://huggingface.co/org/model".to_string(),
            category: ResourceCategory::Model,
            name: "model".to_string(),
            platform: Platform::HuggingFace,
            owner: owner.map(String::from),
            repo: repo.map(String::from),
        }
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ResourceCategory::Model.label(), "MODEL");
        assert_eq!(ResourceCategory::Dataset.label(), "DATASET");
        assert_eq!(ResourceCategory::Code.label(), "CODE");
    }

    #[test]
    fn test_repo_id_forms() {
        assert_eq!(
            reference(Some("org"), Some("model")).repo_id(),
            Some("org/model".to_string())
        );
        assert_eq!(
            reference(None, Some("gpt2")).repo_id(),
            Some("gpt2".to_string())
        );
        assert_eq!(reference(Some("org"), None).repo_id(), None);
    }
}
