//! Hub API HTTP client.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::StatusCode;

use super::response::HubRepoInfo;
use crate::error::{AuditError, EvidenceErrorKind, Result};

/// Hub client configuration.
#[derive(Debug, Clone)]
pub struct HubClientConfig {
    /// Base URL for the hub
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum retries for failed requests
    pub max_retries: u8,
    /// Optional bearer token for gated repositories
    pub token: Option<String>,
}

impl Default for HubClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://huggingface.co".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 2,
            token: std::env::var("HF_TOKEN").ok().filter(|t| !t.is_empty()),
        }
    }
}

/// HTTP client for the model-hosting hub API.
pub struct HubClient {
    client: Client,
    config: HubClientConfig,
}

/// Helper to convert reqwest errors to evidence errors
fn network_error(msg: &str, err: &reqwest::Error) -> AuditError {
    AuditError::evidence(msg, EvidenceErrorKind::NetworkError(err.to_string()))
}

/// Helper to create API errors
fn api_error(msg: impl Into<String>) -> AuditError {
    AuditError::evidence("API request", EvidenceErrorKind::ApiError(msg.into()))
}

impl HubClient {
    /// Create a new hub client.
    pub fn new(config: HubClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", &e))?;

        Ok(Self { client, config })
    }

    /// Fetch repository info from `/api/models/{id}` or `/api/datasets/{id}`.
    pub fn repo_info(&self, repo_id: &str, is_dataset: bool) -> Result<HubRepoInfo> {
        let kind = if is_dataset { "datasets" } else { "models" };
        let url = format!("{}/api/{kind}/{repo_id}", self.config.base_url);
        let body = self.get_with_retries(&url)?;
        serde_json::from_str(&body).map_err(|e| {
            AuditError::evidence(
                "parsing repo info",
                EvidenceErrorKind::InvalidResponse(e.to_string()),
            )
        })
    }

    /// Fetch a raw file from a repository's default branch.
    pub fn raw_file(&self, repo_id: &str, is_dataset: bool, filename: &str) -> Result<String> {
        let prefix = if is_dataset { "datasets/" } else { "" };
        let url = format!(
            "{}/{prefix}{repo_id}/raw/main/{filename}",
            self.config.base_url
        );
        self.get_with_retries(&url)
    }

    /// GET with bounded retries and exponential backoff.
    fn get_with_retries(&self, url: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s, 4s, ...
                let delay = Duration::from_secs(1 << (attempt - 1));
                std::thread::sleep(delay);
                tracing::debug!("Retry attempt {} for {url} after {:?}", attempt, delay);
            }

            match self.send_get(url) {
                Ok(body) => return Ok(body),
                // Not-found is definitive; retrying cannot help.
                Err(e) if is_not_found(&e) => return Err(e),
                Err(e) => {
                    tracing::debug!("Request attempt {} failed: {e}", attempt + 1);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| api_error("Unknown error")))
    }

    fn send_get(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| network_error("Failed to send request", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(api_error(format!(
                "hub returned status {} for {url}",
                status.as_u16()
            )));
        }

        response
            .text()
            .map_err(|e| network_error("Failed to read response body", &e))
    }
}

/// Whether an evidence error represents a definitive 404.
fn is_not_found(err: &AuditError) -> bool {
    matches!(
        err,
        AuditError::Evidence {
            source: EvidenceErrorKind::ApiError(msg),
            ..
        } if msg.contains(&StatusCode::NOT_FOUND.as_u16().to_string())
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HubClientConfig::default();
        assert_eq!(config.base_url, "https://huggingface.co");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_client_creation() {
        let client = HubClient::new(HubClientConfig::default());
        assert!(client.is_ok());
    }

    #[test]
    fn test_not_found_detection() {
        let err = api_error("hub returned status 404 for https://example");
        assert!(is_not_found(&err));
        let err = api_error("hub returned status 500 for https://example");
        assert!(!is_not_found(&err));
    }
}
