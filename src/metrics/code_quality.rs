//! Code-quality metric.
//!
//! For the first clonable linked repository, derives an error-count proxy:
//! run a configured static-analysis tool when the repo carries a config for
//! one, fall back to a conservative per-file estimate when the tool cannot
//! run, or sanity-check a capped sample of source files when no tool config
//! exists. Base score is `clamp(1 − errors/budget, 0, 1)` with bonuses for a
//! tests directory and CI configuration.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::{CodeQualityThresholds, ScoringConfig};
use crate::evidence::{RepoSummary, RepoSummarySource};
use crate::metrics::MetricEvaluator;
use crate::model::{MetricOutcome, ModelContext};

/// Outcome of the error-count probe, kept explicit so the degraded-evidence
/// paths stay visible and testable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaticAnalysis {
    /// No checkout and no file counts to estimate from
    Unavailable,
    /// A configured tool ran; `errors` is its finding count
    ToolRan { errors: usize },
    /// Tool missing/timed out or no tool configured; `errors` is estimated
    FallbackEstimate { errors: usize },
}

/// Static-analysis tools the probe knows how to drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LintTool {
    Flake8,
    Mypy,
}

impl LintTool {
    const ALL: [Self; 2] = [Self::Flake8, Self::Mypy];

    /// Config files whose presence opts the repository into this tool.
    const fn config_markers(self) -> &'static [&'static str] {
        match self {
            Self::Flake8 => &[".flake8", "setup.cfg", "tox.ini", "pyproject.toml"],
            Self::Mypy => &["mypy.ini", ".mypy.ini"],
        }
    }

    const fn command(self) -> &'static str {
        match self {
            Self::Flake8 => "flake8",
            Self::Mypy => "mypy",
        }
    }

    fn is_configured(self, checkout: &Path) -> bool {
        self.config_markers()
            .iter()
            .any(|marker| checkout.join(marker).exists())
    }

    /// Parse the tool's stdout into an error count.
    fn count_errors(self, stdout: &str) -> usize {
        match self {
            Self::Flake8 => stdout.lines().filter(|l| !l.trim().is_empty()).count(),
            Self::Mypy => stdout
                .lines()
                .filter(|l| l.to_lowercase().contains("error:"))
                .count(),
        }
    }

    /// Conservative per-file estimate when the tool cannot run.
    const fn fallback_estimate(self, source_files: usize) -> usize {
        match self {
            Self::Flake8 => source_files / 5,
            Self::Mypy => source_files / 8,
        }
    }
}

pub struct CodeQuality {
    miner: Arc<dyn RepoSummarySource>,
}

impl CodeQuality {
    #[must_use]
    pub fn new(miner: Arc<dyn RepoSummarySource>) -> Self {
        Self { miner }
    }

    fn score(&self, context: &ModelContext, config: &ScoringConfig) -> f64 {
        let thresholds = &config.thresholds.code_quality;

        for repo in context.code_repos.iter().take(thresholds.max_repos) {
            let Some(summary) = self.miner.fetch_repo_summary(repo) else {
                continue;
            };
            // First summarizable repo decides the score.
            return score_summary(&summary, thresholds);
        }

        thresholds.missing_score
    }
}

impl MetricEvaluator for CodeQuality {
    fn name(&self) -> &'static str {
        "code_quality"
    }

    fn compute(&self, context: &ModelContext, config: &ScoringConfig) -> MetricOutcome {
        let (score, latency_ms) = super::timed(|| self.score(context, config));
        MetricOutcome::scalar(score, latency_ms)
    }
}

/// Score one mined repository summary.
fn score_summary(summary: &RepoSummary, thresholds: &CodeQualityThresholds) -> f64 {
    let analysis = assess_errors(summary, thresholds);
    let errors = match analysis {
        StaticAnalysis::Unavailable => return thresholds.missing_score,
        StaticAnalysis::ToolRan { errors } | StaticAnalysis::FallbackEstimate { errors } => errors,
    };

    let budget = thresholds.error_budget.max(1.0);
    let mut score = (1.0 - errors as f64 / budget).clamp(0.0, 1.0);
    if summary.has_tests {
        score += thresholds.tests_bonus;
    }
    if summary.has_ci {
        score += thresholds.ci_bonus;
    }
    score.min(1.0)
}

/// Derive an error-count proxy for a repository.
fn assess_errors(summary: &RepoSummary, thresholds: &CodeQualityThresholds) -> StaticAnalysis {
    let Some(checkout) = summary.checkout.as_deref() else {
        if summary.source_files > 0 {
            return StaticAnalysis::FallbackEstimate {
                errors: summary.source_files / 5,
            };
        }
        return StaticAnalysis::Unavailable;
    };

    let configured: Vec<LintTool> = LintTool::ALL
        .into_iter()
        .filter(|tool| tool.is_configured(checkout))
        .collect();

    if configured.is_empty() {
        return StaticAnalysis::FallbackEstimate {
            errors: syntax_sample_errors(checkout, thresholds.syntax_sample_cap),
        };
    }

    let timeout = Duration::from_secs(thresholds.tool_timeout_secs);
    let mut total_errors = 0usize;
    let mut any_ran = false;
    for tool in configured {
        match run_tool(tool, checkout, timeout) {
            Some(stdout) => {
                total_errors += tool.count_errors(&stdout);
                any_ran = true;
            }
            None => total_errors += tool.fallback_estimate(summary.source_files),
        }
    }

    if any_ran {
        StaticAnalysis::ToolRan {
            errors: total_errors,
        }
    } else {
        StaticAnalysis::FallbackEstimate {
            errors: total_errors,
        }
    }
}

/// Run a tool against the checkout with a hard wall-clock limit.
///
/// Returns the captured stdout, or `None` if the tool is missing, fails to
/// spawn, or exceeds the timeout (in which case it is killed).
fn run_tool(tool: LintTool, checkout: &Path, timeout: Duration) -> Option<String> {
    let mut child = Command::new(tool.command())
        .arg(".")
        .current_dir(checkout)
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .stdin(Stdio::null())
        .spawn()
        .ok()?;

    // Drain stdout on a separate thread so a chatty tool cannot fill the
    // pipe and wedge before the poll loop sees it exit.
    let mut stdout_pipe = child.stdout.take()?;
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        let mut buffer = String::new();
        let _ = stdout_pipe.read_to_string(&mut buffer);
        let _ = tx.send(buffer);
    });

    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(_status)) => {
                return rx.recv_timeout(Duration::from_secs(1)).ok();
            }
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    tracing::warn!(
                        "{} timed out after {:?} in {}",
                        tool.command(),
                        timeout,
                        checkout.display()
                    );
                    return None;
                }
                std::thread::sleep(Duration::from_millis(50));
            }
            Err(_) => return None,
        }
    }
}

/// Count files failing a cheap delimiter-balance sanity check, over a capped
/// sample of source files.
fn syntax_sample_errors(checkout: &Path, sample_cap: usize) -> usize {
    let mut errors = 0usize;
    let mut sampled = 0usize;

    for entry in walkdir::WalkDir::new(checkout)
        .into_iter()
        .filter_entry(|e| e.file_name() != ".git")
        .filter_map(std::result::Result::ok)
    {
        if sampled >= sample_cap {
            break;
        }
        if !entry.file_type().is_file() {
            continue;
        }
        let is_source = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| matches!(ext, "py" | "rs" | "js" | "ts" | "go" | "java"));
        if !is_source {
            continue;
        }
        sampled += 1;
        match std::fs::read_to_string(entry.path()) {
            Ok(content) if !balanced_delimiters(&content) => errors += 1,
            Ok(_) => {}
            Err(_) => errors += 1,
        }
    }

    errors
}

/// Cheap structural sanity check: paired (), [] and {} counts line up.
fn balanced_delimiters(content: &str) -> bool {
    let mut round = 0i64;
    let mut square = 0i64;
    let mut curly = 0i64;
    for c in content.chars() {
        match c {
            '(' => round += 1,
            ')' => round -= 1,
            '[' => square += 1,
            ']' => square -= 1,
            '{' => curly += 1,
            '}' => curly -= 1,
            _ => {}
        }
    }
    round == 0 && square == 0 && curly == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::OfflineMiner;
    use crate::model::{Platform, ResourceCategory, ResourceReference};

    fn thresholds() -> CodeQualityThresholds {
        CodeQualityThresholds::default()
    }

    fn summary(errors_worth_of_files: usize, tests: bool, ci: bool) -> RepoSummary {
        RepoSummary {
            unique_authors: 1,
            total_commits: 1,
            recent_commits: 0,
            has_tests: tests,
            has_ci: ci,
            source_files: errors_worth_of_files,
            checkout: None,
        }
    }

    #[test]
    fn test_no_code_repos_default() {
        let metric = CodeQuality::new(Arc::new(OfflineMiner));
        let ctx = ModelContext::new(
            ResourceReference {
                url: "https://huggingface.co/org/m".to_string(),
                category: ResourceCategory::Model,
                name: "m".to_string(),
                platform: Platform::HuggingFace,
                owner: Some("org".to_string()),
                repo: Some("m".to_string()),
            },
            vec![],
            vec![],
        );
        assert_eq!(metric.score(&ctx, &ScoringConfig::default()), 0.4);
    }

    #[test]
    fn test_unavailable_summary_scores_default() {
        let s = score_summary(&summary(0, true, true), &thresholds());
        assert_eq!(s, 0.4);
    }

    #[test]
    fn test_fallback_estimate_without_checkout() {
        // 100 source files → 20 estimated errors → base 0.6
        let s = score_summary(&summary(100, false, false), &thresholds());
        assert!((s - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_bonuses_cap_at_one() {
        // 5 files → 1 estimated error → base 0.98, bonuses push past cap
        let s = score_summary(&summary(5, true, true), &thresholds());
        assert_eq!(s, 1.0);
    }

    #[test]
    fn test_syntax_sample_counts_unbalanced_files() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("ok.py"), "def f():\n    return (1 + 2)\n").unwrap();
        std::fs::write(dir.path().join("bad.py"), "def f(:\n    return (1 + 2\n").unwrap();
        std::fs::write(dir.path().join("notes.md"), "((((").unwrap();
        assert_eq!(syntax_sample_errors(dir.path(), 20), 1);
    }

    #[test]
    fn test_assess_with_checkout_and_no_tool_config() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join("main.py"), "print('hello')\n").unwrap();
        let summary = RepoSummary {
            source_files: 1,
            checkout: Some(dir.path().to_path_buf()),
            ..RepoSummary::default()
        };
        let analysis = assess_errors(&summary, &thresholds());
        assert_eq!(analysis, StaticAnalysis::FallbackEstimate { errors: 0 });
    }

    #[test]
    fn test_balanced_delimiters() {
        assert!(balanced_delimiters("fn main() { let v = vec![1]; }"));
        assert!(!balanced_delimiters("fn main() { let v = vec![1]; "));
    }
}
