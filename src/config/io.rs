// src/config/io.rs
use super::types::SweepToml;
use super::CONFIG_FILE;
use crate::error::{Result, SweepError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads the first `tidysweep.toml` found in `dirs`, or defaults.
///
/// # Errors
/// Returns error if a config file exists but cannot be read or parsed.
pub fn load_from(dirs: &[&Path]) -> Result<SweepToml> {
    let Some(path) = dirs.iter().map(|d| d.join(CONFIG_FILE)).find(|p| p.is_file()) else {
        return Ok(SweepToml::default());
    };
    let content = fs::read_to_string(&path).map_err(|source| SweepError::Io {
        source,
        path: path.clone(),
    })?;
    let parsed = parse_toml(&content, &path)?;
    debug!("Loaded settings from '{}'", path.display());
    Ok(parsed)
}

/// Parses config file contents.
///
/// # Errors
/// Returns error on malformed TOML or unknown keys.
pub fn parse_toml(content: &str, path: &Path) -> Result<SweepToml> {
    toml::from_str(content).map_err(|source| SweepError::Config {
        source,
        path: PathBuf::from(path),
    })
}
