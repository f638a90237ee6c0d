//! Batch audit pipeline.
//!
//! Drives one invocation end-to-end: read and tokenize the URL file, build
//! model contexts, enrich and score each model sequentially, and emit one
//! NDJSON line per success. Individual model failures are logged and skipped;
//! only input problems and a fully empty batch are fatal.

pub mod output;

pub use output::NdjsonEmitter;

use std::io::Write;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::PathBuf;
use std::sync::Arc;

use crate::classify::{build_contexts, tokenize_url_list};
use crate::config::load_or_default;
use crate::error::{AuditError, InputErrorKind, Result};
use crate::evidence::{ModelHost, RepoSummarySource};
use crate::scoring::ScoreOrchestrator;

/// Exit codes for shell integration
pub mod exit_codes {
    /// At least one model was scored
    pub const SUCCESS: i32 = 0;
    /// Fatal input problem or zero models scored
    pub const FAILURE: i32 = 1;
}

/// Options for one audit run.
#[derive(Debug, Clone)]
pub struct AuditOptions {
    /// File containing whitespace/comma-separated URL tokens
    pub url_file: PathBuf,
    /// Explicit config file path, if any
    pub config_path: Option<PathBuf>,
}

/// Run a batch audit, writing NDJSON records to `out`.
///
/// Returns the process exit code. Partial success is success: a run exits
/// zero as long as at least one model was scored.
pub fn run_audit(
    options: &AuditOptions,
    host: Arc<dyn ModelHost>,
    miner: Arc<dyn RepoSummarySource>,
    out: &mut dyn Write,
) -> Result<i32> {
    let content = std::fs::read_to_string(&options.url_file).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AuditError::input(
                "reading URL file",
                InputErrorKind::UrlFileNotFound(options.url_file.clone()),
            )
        } else {
            AuditError::io(options.url_file.clone(), e)
        }
    })?;

    let tokens = tokenize_url_list(&content);
    if tokens.is_empty() {
        return Err(AuditError::input(
            "parsing URL file",
            InputErrorKind::EmptyUrlList,
        ));
    }

    let contexts = build_contexts(&tokens);
    if contexts.is_empty() {
        return Err(AuditError::input(
            "classifying URLs",
            InputErrorKind::NoModelUrls,
        ));
    }

    let (config, loaded_from) = load_or_default(options.config_path.as_deref());
    match &loaded_from {
        Some(path) => tracing::info!("using config from {}", path.display()),
        None => tracing::debug!("using built-in default config"),
    }

    let orchestrator = ScoreOrchestrator::new(config, host, miner);
    let mut emitter = NdjsonEmitter::new(out);
    let mut scored = 0usize;

    tracing::info!("auditing {} model(s)", contexts.len());

    for mut context in contexts {
        let name = context.model.name.clone();
        // A model that cannot be scored at all is logged and skipped; the
        // batch continues with the remaining models.
        let record = catch_unwind(AssertUnwindSafe(|| {
            orchestrator.enrich(&mut context);
            orchestrator.audit(&context)
        }));
        match record {
            Ok(record) => match emitter.emit(&record) {
                Ok(()) => scored += 1,
                Err(e) => tracing::error!("could not emit record for {name}: {e}"),
            },
            Err(_) => tracing::error!("scoring panicked for {name}; skipping"),
        }
    }

    if scored == 0 {
        return Err(AuditError::input(
            "scoring batch",
            InputErrorKind::NoModelsScored,
        ));
    }

    Ok(exit_codes::SUCCESS)
}
