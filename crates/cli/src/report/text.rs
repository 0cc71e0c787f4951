// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text summary file for CI job summaries.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::write::write_file;

use super::SummaryStats;

/// File name written inside the summary directory.
pub const TEXT_SUMMARY_FILE: &str = "test-summary.txt";

/// Write `stats` as a single line to `<dir>/test-summary.txt`.
///
/// Previous content is replaced. The directory is created if missing.
pub fn write_text_summary(dir: &Path, stats: &SummaryStats, timeout: Duration) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let path = dir.join(TEXT_SUMMARY_FILE);
    write_file(&path, stats.to_string().into_bytes(), timeout)?;
    tracing::debug!(path = %path.display(), "text summary written");
    Ok(path)
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
