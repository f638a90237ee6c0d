//! Unified error types for model-audit.
//!
//! Fatal conditions (unreadable input, no model URLs) surface through this
//! hierarchy; evidence and metric failures never do — they degrade to empty
//! fields and default scores before reaching the batch driver.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for model-audit operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AuditError {
    /// Errors in the URL-file input
    #[error("Invalid input: {context}")]
    Input {
        context: String,
        #[source]
        source: InputErrorKind,
    },

    /// Errors while fetching evidence from remote hosts
    #[error("Evidence fetch failed: {context}")]
    Evidence {
        context: String,
        #[source]
        source: EvidenceErrorKind,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },
}

/// Specific input error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InputErrorKind {
    #[error("URL file not found: {0:?}")]
    UrlFileNotFound(PathBuf),

    #[error("URL file contains no URLs")]
    EmptyUrlList,

    #[error("no model URLs found after classification")]
    NoModelUrls,

    #[error("no models were successfully scored")]
    NoModelsScored,

    #[error("unrecognized URL: {0}")]
    UnrecognizedUrl(String),
}

/// Specific evidence error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EvidenceErrorKind {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Clone failed: {0}")]
    CloneFailed(String),

    #[error("Clone timed out after {0}s")]
    CloneTimeout(u64),
}

/// Convenient Result type for model-audit operations
pub type Result<T> = std::result::Result<T, AuditError>;

impl AuditError {
    /// Create an input error with context
    pub fn input(context: impl Into<String>, source: InputErrorKind) -> Self {
        Self::Input {
            context: context.into(),
            source,
        }
    }

    /// Create an evidence error with context
    pub fn evidence(context: impl Into<String>, source: EvidenceErrorKind) -> Self {
        Self::Evidence {
            context: context.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Evidence {
            context: "JSON deserialization".to_string(),
            source: EvidenceErrorKind::InvalidResponse(err.to_string()),
        }
    }
}
