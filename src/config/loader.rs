//! Configuration file loading.

use crate::config::schema::ResolverConfig;
use crate::error::{ContextError, Result};
use std::fs;
use std::path::Path;

/// Load a single config file and parse it into [`ResolverConfig`].
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ResolverConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ContextError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ContextError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into [`ResolverConfig`].
///
/// Empty content yields the defaults.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ResolverConfig> {
    if content.trim().is_empty() {
        return Ok(ResolverConfig::default());
    }

    serde_yaml::from_str(content).map_err(|e| ContextError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Load config with optional path override.
///
/// Without a path the built-in defaults are used.
pub fn load_config(config_override: Option<&Path>) -> Result<ResolverConfig> {
    match config_override {
        Some(path) => load_config_file(path),
        None => Ok(ResolverConfig::default()),
    }
}
