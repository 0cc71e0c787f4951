// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles resultsheet.toml parsing with version validation and unknown key warnings.

mod parse;
mod timeout;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

pub use timeout::{deserialize_timeout, parse_timeout};

use crate::error::{Error, Result};
use crate::write::DEFAULT_WRITE_TIMEOUT;
use parse::{parse_bool_or, parse_path_option, parse_path_or_else, warn_unknown_key};

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    collect: Option<toml::Value>,

    #[serde(default)]
    report: Option<toml::Value>,

    #[serde(default, deserialize_with = "deserialize_timeout")]
    write_timeout: Option<Duration>,

    #[serde(flatten)]
    unknown: BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Result collector settings.
    pub collect: CollectConfig,

    /// Report builder settings.
    pub report: ReportConfig,

    /// Upper bound on any single artifact write.
    pub write_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            collect: CollectConfig::default(),
            report: ReportConfig::default(),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }
}

/// `[collect]` table.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectConfig {
    /// Nominal result file; only its directory is used.
    pub output_file: PathBuf,
}

impl Default for CollectConfig {
    fn default() -> Self {
        Self {
            output_file: Self::default_output_file(),
        }
    }
}

impl CollectConfig {
    pub(crate) fn default_output_file() -> PathBuf {
        PathBuf::from("reports/json/results.json")
    }
}

/// `[report]` table.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    /// Folder of JSON batch files.
    pub input: PathBuf,

    /// Spreadsheet destination.
    pub output: PathBuf,

    /// Directory for `test-summary.txt` (None = no text summary).
    pub summary_dir: Option<PathBuf>,

    /// Merge files in file-name order instead of listing order.
    pub sort_files: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input: Self::default_input(),
            output: Self::default_output(),
            summary_dir: None,
            sort_files: true,
        }
    }
}

impl ReportConfig {
    pub(crate) fn default_input() -> PathBuf {
        PathBuf::from("reports/json")
    }

    pub(crate) fn default_output() -> PathBuf {
        PathBuf::from("reports/test-report.xlsx")
    }
}

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &["version", "collect", "report", "write_timeout"];

const KNOWN_COLLECT_KEYS: &[&str] = &["output_file"];

const KNOWN_REPORT_KEYS: &[&str] = &["input", "output", "summary_dir", "sort_files"];

/// Load config, warning on unknown keys.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("failed to read config: {e}"),
        path: Some(path.to_path_buf()),
    })?;

    parse(&content, path)
}

/// Parse config from string content, warning on unknown keys.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let flexible: FlexibleConfig = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if flexible.version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade resultsheet to use this config.",
                flexible.version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let collect = match flexible.collect {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_COLLECT_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("collect.{key}"));
                }
            }
            CollectConfig {
                output_file: parse_path_or_else(
                    t.get("output_file"),
                    CollectConfig::default_output_file,
                ),
            }
        }
        _ => CollectConfig::default(),
    };

    let report = match flexible.report {
        Some(toml::Value::Table(t)) => {
            for key in t.keys() {
                if !KNOWN_REPORT_KEYS.contains(&key.as_str()) {
                    warn_unknown_key(path, &format!("report.{key}"));
                }
            }
            ReportConfig {
                input: parse_path_or_else(t.get("input"), ReportConfig::default_input),
                output: parse_path_or_else(t.get("output"), ReportConfig::default_output),
                summary_dir: parse_path_option(t.get("summary_dir")),
                sort_files: parse_bool_or(t.get("sort_files"), true),
            }
        }
        _ => ReportConfig::default(),
    };

    Ok(Config {
        version: flexible.version,
        collect,
        report,
        write_timeout: flexible.write_timeout.unwrap_or(DEFAULT_WRITE_TIMEOUT),
    })
}

/// Load the explicit or discovered config, or defaults when there is none.
pub fn resolve(explicit: Option<&Path>, cwd: &Path) -> Result<Config> {
    match crate::discovery::resolve_config(explicit, cwd)? {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            load(&path)
        }
        None => Ok(Config::default()),
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
