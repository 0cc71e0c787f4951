// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Merge JSON result batches from a directory.
//!
//! Every `*.json` file directly inside the directory is expected to hold a
//! flat array of result records. Files that cannot be read, do not parse, or
//! hold anything other than an array are skipped and reported; they never
//! abort the merge.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::record::{
    Status, TestResultRecord, sanitize_error, strip_suite_suffix, suite_or_default,
};

/// Ingestion settings.
#[derive(Debug, Clone, Copy)]
pub struct IngestOptions {
    /// Merge files in lexicographic name order rather than listing order.
    pub sort_files: bool,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self { sort_files: true }
    }
}

/// Why a file or element was left out of the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unreadable(String),
    InvalidJson(String),
    NotAnArray,
    /// Element at this index is not an object with a string `testName`.
    InvalidRecord(usize),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Unreadable(e) => write!(f, "unreadable: {e}"),
            SkipReason::InvalidJson(e) => write!(f, "invalid JSON: {e}"),
            SkipReason::NotAnArray => f.write_str("top-level value is not an array"),
            SkipReason::InvalidRecord(idx) => {
                write!(f, "element {idx} is not a record with a testName")
            }
        }
    }
}

/// A file (or part of one) that did not contribute records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// Merged records plus bookkeeping about the merge.
#[derive(Debug, Default)]
pub struct Ingestion {
    pub records: Vec<TestResultRecord>,
    /// Files whose array was merged.
    pub files_read: Vec<PathBuf>,
    pub skipped: Vec<Skipped>,
}

impl Ingestion {
    fn skip(&mut self, path: &Path, reason: SkipReason) {
        tracing::warn!(path = %path.display(), %reason, "skipping result data");
        self.skipped.push(Skipped {
            path: path.to_path_buf(),
            reason,
        });
    }
}

/// Source shape of an ingested element. Only `testName` is required.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRecord {
    #[serde(default)]
    suite_name: Option<String>,
    test_name: String,
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    error: Option<String>,
}

impl RawRecord {
    fn normalize(self) -> TestResultRecord {
        let suite_name = strip_suite_suffix(suite_or_default(self.suite_name.as_deref()));
        let status = match self.status {
            None | Some(Value::Null) => Status::default(),
            Some(Value::String(label)) => Status::from(label),
            Some(other) => Status::Other(other.to_string()),
        };
        let error = self
            .error
            .as_deref()
            .map(sanitize_error)
            .unwrap_or_default();
        TestResultRecord::new(suite_name, self.test_name, status, error)
    }
}

/// List `*.json` files directly inside `dir`.
pub fn json_files(dir: &Path, options: IngestOptions) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let is_json = path.extension().is_some_and(|ext| ext == "json");
        if is_json && path.is_file() {
            files.push(path);
        }
    }

    if options.sort_files {
        files.sort();
    }
    Ok(files)
}

/// Merge every result batch in `dir`.
///
/// Fails only when the directory itself cannot be listed.
pub fn ingest_dir(dir: &Path, options: IngestOptions) -> Result<Ingestion> {
    let mut ingestion = Ingestion::default();
    for path in json_files(dir, options)? {
        ingest_file(&path, &mut ingestion);
    }
    tracing::debug!(
        dir = %dir.display(),
        files = ingestion.files_read.len(),
        records = ingestion.records.len(),
        skipped = ingestion.skipped.len(),
        "ingestion finished"
    );
    Ok(ingestion)
}

/// Append one file's records to `ingestion`.
pub fn ingest_file(path: &Path, ingestion: &mut Ingestion) {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => return ingestion.skip(path, SkipReason::Unreadable(e.to_string())),
    };
    let value: serde_json::Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => return ingestion.skip(path, SkipReason::InvalidJson(e.to_string())),
    };
    let serde_json::Value::Array(elements) = value else {
        return ingestion.skip(path, SkipReason::NotAnArray);
    };

    let before = ingestion.records.len();
    for (idx, element) in elements.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(element) {
            Ok(raw) => ingestion.records.push(raw.normalize()),
            Err(_) => ingestion.skip(path, SkipReason::InvalidRecord(idx)),
        }
    }

    tracing::debug!(
        path = %path.display(),
        records = ingestion.records.len() - before,
        "ingested result file"
    );
    ingestion.files_read.push(path.to_path_buf());
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
