//! Configuration file loading and discovery.
//!
//! An absent or malformed config file is never fatal: scoring falls back to
//! the built-in defaults with a warning.

use std::path::{Path, PathBuf};

use super::types::ScoringConfig;

/// Standard config file names to search for.
const CONFIG_FILE_NAMES: &[&str] = &[
    ".model-audit.yaml",
    ".model-audit.yml",
    "model-audit.yaml",
    "model-audit.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. User config directory (`~/.config/model-audit/`)
/// 4. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        if path.exists() {
            return Some(path.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if let Some(path) = find_config_in_dir(&cwd) {
            return Some(path);
        }
    }

    if let Some(config_dir) = dirs::config_dir() {
        if let Some(path) = find_config_in_dir(&config_dir.join("model-audit")) {
            return Some(path);
        }
    }

    if let Some(home) = dirs::home_dir() {
        if let Some(path) = find_config_in_dir(&home) {
            return Some(path);
        }
    }

    None
}

fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Load a [`ScoringConfig`] from a YAML file.
pub fn load_config_file(path: &Path) -> Result<ScoringConfig, String> {
    let content =
        std::fs::read_to_string(path).map_err(|e| format!("cannot read config file: {e}"))?;
    let config: ScoringConfig =
        serde_yaml::from_str(&content).map_err(|e| format!("cannot parse config file: {e}"))?;
    config.validate().map_err(|e| e.to_string())?;
    Ok(config)
}

/// Load config from a discovered file, or return the built-in defaults.
///
/// Returns the config together with the path it was loaded from, if any.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (ScoringConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (ScoringConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!(
                    "Failed to load config from {}: {e}; using defaults",
                    path.display()
                );
                (ScoringConfig::default(), None)
            }
        },
    )
}
