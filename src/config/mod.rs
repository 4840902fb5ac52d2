//! Configuration module
//!
//! Handles loading and saving of saas-architect.toml settings files.

mod types;

pub use types::{ApiProvider, ColorChoice, Config, Display, ExportSettings, ProviderSettings};

use crate::error::{ArchitectError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "saas-architect.toml";

/// Resolve an optional `--config` argument to a path
pub fn resolve_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Load configuration from a TOML file
pub fn load(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path).map_err(|e| {
        ArchitectError::Config(format!(
            "Cannot read config from '{}': {}. Run 'saas-architect config init' to create one.",
            path.display(),
            e
        ))
    })?;

    let config: Config = toml::from_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(config)
}

/// Load configuration, falling back to defaults when the file does not exist
///
/// A file that exists but cannot be parsed is still an error.
pub fn load_or_default(path: &Path) -> Result<Config> {
    if path.exists() {
        load(path)
    } else {
        tracing::debug!(path = %path.display(), "no configuration file, using defaults");
        Ok(Config::default())
    }
}

/// Save configuration to a TOML file
pub fn save(config: &Config, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)
        .map_err(|e| ArchitectError::Config(format!("Failed to serialize config: {}", e)))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, toml)?;
    Ok(())
}
