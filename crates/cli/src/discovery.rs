//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for resultsheet.toml.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Config file name looked up during discovery.
pub const CONFIG_FILE: &str = "resultsheet.toml";

/// Find resultsheet.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    for dir in start_dir.ancestors() {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        // Stop at git root
        if dir.join(".git").exists() {
            return None;
        }
    }
    None
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "RESULTSHEET_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    let Some(path) = explicit else {
        return Ok(find_config(cwd));
    };
    let path = if path.is_relative() {
        cwd.join(path)
    } else {
        path.to_path_buf()
    };
    if path.is_file() {
        Ok(Some(path))
    } else {
        Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path),
        })
    }
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
