//! Git repository mining.
//!
//! Clones linked code repositories into a per-run cache and summarizes their
//! history and tree shape for the scoring engine. Clone destinations are
//! content-addressed from `owner/repo`, so concurrent evaluators touching the
//! same repository land on the same path and different repositories never
//! collide. The cache directory is deleted when the miner is dropped.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tempfile::TempDir;
use walkdir::WalkDir;

use crate::error::{AuditError, EvidenceErrorKind, Result};
use crate::evidence::{RepoSummary, RepoSummarySource};
use crate::model::{Platform, ResourceReference};

/// CI marker files probed at the repository root.
const CI_MARKERS: &[&str] = &[
    ".github/workflows",
    ".gitlab-ci.yml",
    ".travis.yml",
    ".circleci",
    "azure-pipelines.yml",
];

/// Source file extensions counted by the tree survey.
const SOURCE_EXTENSIONS: &[&str] = &["py", "rs", "js", "ts", "go", "java", "c", "cpp"];

/// Upper bound on entries visited by the tree survey.
const SURVEY_ENTRY_CAP: usize = 5_000;

/// Miner tuning knobs.
#[derive(Debug, Clone)]
pub struct MinerConfig {
    /// Hard wall-clock limit for one clone
    pub clone_timeout: Duration,
    /// Shallow-clone depth
    pub clone_depth: i32,
    /// Maximum commits walked per repository
    pub max_commits: usize,
    /// Window for the recent-commit count
    pub recent_window_days: i64,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            clone_timeout: Duration::from_secs(30),
            clone_depth: 50,
            max_commits: 200,
            recent_window_days: 90,
        }
    }
}

/// Clones and summarizes code repositories.
pub struct RepoMiner {
    cache: TempDir,
    config: MinerConfig,
}

impl RepoMiner {
    /// Create a miner with a fresh per-run clone cache.
    pub fn new(config: MinerConfig) -> Result<Self> {
        let cache = tempfile::Builder::new()
            .prefix("model-audit-clones-")
            .tempdir()
            .map_err(|e| AuditError::io(std::env::temp_dir(), e))?;
        Ok(Self { cache, config })
    }

    /// Content-addressed clone destination for a repository.
    fn clone_path(&self, repo_id: &str) -> PathBuf {
        let digest = Sha256::digest(repo_id.as_bytes());
        let mut hex = String::with_capacity(16);
        for byte in &digest[..8] {
            hex.push_str(&format!("{byte:02x}"));
        }
        self.cache.path().join(hex)
    }

    /// Clone `url` into `dest`, enforcing the configured wall-clock timeout.
    ///
    /// The clone runs on a worker thread; on timeout the partial checkout is
    /// discarded and the worker is abandoned (it holds no shared state).
    fn clone_with_timeout(&self, url: &str, dest: &Path) -> Result<()> {
        let (tx, rx) = mpsc::channel();
        let url = url.to_string();
        let url_for_thread = url.clone();
        let dest_owned = dest.to_path_buf();
        let depth = self.config.clone_depth;

        std::thread::spawn(move || {
            let mut fetch_options = git2::FetchOptions::new();
            fetch_options.depth(depth);
            let result = git2::build::RepoBuilder::new()
                .fetch_options(fetch_options)
                .clone(&url_for_thread, &dest_owned)
                .map(|_| ())
                .map_err(|e| e.message().to_string());
            let _ = tx.send(result);
        });

        match rx.recv_timeout(self.config.clone_timeout) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(message)) => {
                let _ = std::fs::remove_dir_all(dest);
                Err(AuditError::evidence(
                    format!("cloning {url}"),
                    EvidenceErrorKind::CloneFailed(message),
                ))
            }
            Err(_) => {
                let _ = std::fs::remove_dir_all(dest);
                Err(AuditError::evidence(
                    format!("cloning {url}"),
                    EvidenceErrorKind::CloneTimeout(self.config.clone_timeout.as_secs()),
                ))
            }
        }
    }

    /// Walk the commit graph and collect author/recency counts.
    fn analyze_history(&self, checkout: &Path) -> Result<(usize, usize, usize)> {
        let repo = git2::Repository::open(checkout).map_err(|e| {
            AuditError::evidence(
                "opening cloned repository",
                EvidenceErrorKind::CloneFailed(e.message().to_string()),
            )
        })?;

        let mut walk = repo.revwalk().map_err(git_error)?;
        walk.push_head().map_err(git_error)?;
        walk.set_sorting(git2::Sort::TIME).map_err(git_error)?;

        let cutoff = Utc::now().timestamp() - self.config.recent_window_days * 24 * 60 * 60;
        let mut authors: HashSet<String> = HashSet::new();
        let mut total = 0usize;
        let mut recent = 0usize;

        for oid in walk.take(self.config.max_commits) {
            let oid = oid.map_err(git_error)?;
            let commit = repo.find_commit(oid).map_err(git_error)?;
            let author = commit.author();
            authors.insert(format!(
                "{} <{}>",
                author.name().unwrap_or(""),
                author.email().unwrap_or("")
            ));
            if commit.time().seconds() >= cutoff {
                recent += 1;
            }
            total += 1;
        }

        Ok((authors.len(), total, recent))
    }
}

fn git_error(e: git2::Error) -> AuditError {
    AuditError::evidence(
        "walking commit history",
        EvidenceErrorKind::CloneFailed(e.message().to_string()),
    )
}

/// Bounded survey of a checkout's tree: tests dir, CI config, source count.
fn survey_tree(checkout: &Path) -> (bool, bool, usize) {
    let has_tests = checkout.join("tests").is_dir() || checkout.join("test").is_dir();
    let has_ci = CI_MARKERS.iter().any(|m| checkout.join(m).exists());

    let mut source_files = 0usize;
    for entry in WalkDir::new(checkout)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(std::result::Result::ok)
        .take(SURVEY_ENTRY_CAP)
    {
        if !entry.file_type().is_file() {
            continue;
        }
        let is_source = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext));
        if is_source {
            source_files += 1;
        }
    }

    (has_tests, has_ci, source_files)
}

impl RepoSummarySource for RepoMiner {
    fn fetch_repo_summary(&self, reference: &ResourceReference) -> Option<RepoSummary> {
        if reference.platform != Platform::GitHub {
            return None;
        }
        let repo_id = reference.repo_id()?;
        let dest = self.clone_path(&repo_id);

        if !dest.exists() {
            if let Err(e) = self.clone_with_timeout(&reference.url, &dest) {
                tracing::warn!("could not clone {}: {e}", reference.url);
                return None;
            }
        }

        let (unique_authors, total_commits, recent_commits) = match self.analyze_history(&dest) {
            Ok(counts) => counts,
            Err(e) => {
                tracing::warn!("could not analyze {}: {e}", reference.url);
                return None;
            }
        };
        let (has_tests, has_ci, source_files) = survey_tree(&dest);

        Some(RepoSummary {
            unique_authors,
            total_commits,
            recent_commits,
            has_tests,
            has_ci,
            source_files,
            checkout: Some(dest),
        })
    }

    fn name(&self) -> &'static str {
        "git"
    }
}
