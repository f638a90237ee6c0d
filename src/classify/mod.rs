//! URL classification and dataset/code association.
//!
//! Classifies each input URL as MODEL / DATASET / CODE from its host and path
//! segments, then builds one [`ModelContext`] per model URL by associating the
//! datasets and code repositories seen earlier in the list. Association uses
//! token overlap, owner equality and name similarity; when nothing matches,
//! the most recently seen resources are attached as a best guess.

use crate::error::{AuditError, InputErrorKind, Result};
use crate::model::{ModelContext, Platform, ResourceCategory, ResourceReference};

/// Minimum Jaro-Winkler similarity for two resource names to count as linked.
const NAME_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Split the raw URL-file content into candidate URL tokens.
///
/// Tokens are separated by any run of whitespace and/or commas.
#[must_use]
pub fn tokenize_url_list(content: &str) -> Vec<String> {
    content
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Classify a single URL into a [`ResourceReference`].
pub fn classify_url(raw: &str) -> Result<ResourceReference> {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .split_once("://")
        .map_or(trimmed, |(_, rest)| rest);
    let mut parts = without_scheme.split('/');
    let host = parts.next().unwrap_or_default().to_lowercase();
    let segments: Vec<&str> = parts.filter(|s| !s.is_empty()).collect();

    if host.ends_with("huggingface.co") {
        classify_hub_url(trimmed, &segments)
    } else if host.ends_with("github.com") {
        classify_github_url(trimmed, &segments)
    } else {
        // Unknown platforms are treated as datasets: a bad guess here only
        // weakens association, never the scored output.
        Ok(ResourceReference {
            url: trimmed.to_string(),
            category: ResourceCategory::Dataset,
            name: segments
                .last()
                .map_or_else(|| trimmed.to_string(), |s| (*s).to_string()),
            platform: Platform::Other,
            owner: None,
            repo: None,
        })
    }
}

fn classify_hub_url(url: &str, segments: &[&str]) -> Result<ResourceReference> {
    if segments.is_empty() {
        return Err(AuditError::input(
            "classifying Hugging Face URL",
            InputErrorKind::UnrecognizedUrl(url.to_string()),
        ));
    }

    // The /datasets/<owner>/<repo> route marks a dataset; everything else on
    // the hub is a model page at <owner>/<repo> (or bare <repo>).
    if segments[0] == "datasets" {
        let owner = segments.get(1).map(|s| (*s).to_string());
        let repo = segments.get(2).map(|s| (*s).to_string());
        let name = match (&owner, &repo) {
            (Some(o), Some(r)) => format!("{o}/{r}"),
            (Some(o), None) => o.clone(),
            _ => url.to_string(),
        };
        Ok(ResourceReference {
            url: url.to_string(),
            category: ResourceCategory::Dataset,
            name,
            platform: Platform::HuggingFace,
            owner,
            repo,
        })
    } else {
        let owner = Some(segments[0].to_string());
        let repo = segments.get(1).map(|s| (*s).to_string());
        let name = repo.clone().unwrap_or_else(|| segments[0].to_string());
        Ok(ResourceReference {
            url: url.to_string(),
            category: ResourceCategory::Model,
            name,
            platform: Platform::HuggingFace,
            owner,
            repo,
        })
    }
}

fn classify_github_url(url: &str, segments: &[&str]) -> Result<ResourceReference> {
    if segments.len() < 2 {
        return Err(AuditError::input(
            "classifying GitHub URL",
            InputErrorKind::UnrecognizedUrl(url.to_string()),
        ));
    }
    let owner = segments[0].to_string();
    let repo = segments[1].trim_end_matches(".git").to_string();
    Ok(ResourceReference {
        url: url.to_string(),
        category: ResourceCategory::Code,
        name: format!("{owner}/{repo}"),
        platform: Platform::GitHub,
        owner: Some(owner),
        repo: Some(repo),
    })
}

/// Build model contexts from a token list.
///
/// Datasets and code repositories are expected to appear before the model
/// they belong to; they stay available for later models as well, since one
/// dataset or repo can back several models. URLs that fail to classify are
/// skipped with a warning.
#[must_use]
pub fn build_contexts(tokens: &[String]) -> Vec<ModelContext> {
    let mut pending_datasets: Vec<ResourceReference> = Vec::new();
    let mut pending_code: Vec<ResourceReference> = Vec::new();
    let mut contexts = Vec::new();

    for token in tokens {
        let reference = match classify_url(token) {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!("skipping URL {token}: {e}");
                continue;
            }
        };
        match reference.category {
            ResourceCategory::Dataset => pending_datasets.push(reference),
            ResourceCategory::Code => pending_code.push(reference),
            ResourceCategory::Model => {
                let datasets = associate(&reference, &pending_datasets);
                let code_repos = associate(&reference, &pending_code);
                contexts.push(ModelContext::new(reference, datasets, code_repos));
            }
        }
    }

    contexts
}

/// Pick the resources relevant to a model from the pending pool.
fn associate(model: &ResourceReference, pool: &[ResourceReference]) -> Vec<ResourceReference> {
    if pool.is_empty() {
        return Vec::new();
    }

    let model_tokens = name_tokens(&model.name);
    let mut relevant: Vec<ResourceReference> = pool
        .iter()
        .filter(|candidate| {
            let candidate_tokens = name_tokens(&candidate.name);
            let overlaps = candidate_tokens.iter().any(|t| model_tokens.contains(t));
            let same_owner = match (&model.owner, &candidate.owner) {
                (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
                _ => false,
            };
            let similar = strsim::jaro_winkler(
                &model.name.to_lowercase(),
                &candidate.name.to_lowercase(),
            ) >= NAME_SIMILARITY_THRESHOLD;
            overlaps || same_owner || similar
        })
        .cloned()
        .collect();

    // No signal at all: fall back to the most recently listed resources.
    if relevant.is_empty() {
        let start = pool.len().saturating_sub(2);
        relevant = pool[start..].to_vec();
    }

    relevant
}

/// Alphabetic tokens of length > 2, lowercased.
fn name_tokens(name: &str) -> Vec<String> {
    name.to_lowercase()
        .split(|c: char| !c.is_ascii_alphabetic())
        .filter(|t| t.len() > 2)
        .map(str::to_string)
        .collect()
}
