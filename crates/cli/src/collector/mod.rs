// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result collector.
//!
//! Accumulates one [`TestResultRecord`] per completed test and, when the run
//! ends, flushes them to a new timestamped JSON file. One collector serves
//! exactly one run.

mod events;

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};

pub use events::{
    Flow, LifecycleEvent, LifecycleListener, MalformedLine, Replay, TestDescriptor, TestError,
    dispatch, replay,
};

use crate::error::{Error, Result};
use crate::record::{
    Status, TestResultRecord, format_timestamp, sanitize_error, suite_or_default,
};
use crate::write::{DEFAULT_WRITE_TIMEOUT, write_new_file};

/// Title recorded for a test whose descriptor carries none.
pub const UNTITLED_TEST: &str = "Untitled Test";

/// Prefix of every JSON batch file.
pub const REPORT_FILE_PREFIX: &str = "test-report-";

/// Collector settings.
#[derive(Debug, Clone)]
pub struct CollectorConfig {
    /// Nominal output file; its parent directory receives the batch files.
    pub output_file: PathBuf,
    pub write_timeout: Duration,
}

impl CollectorConfig {
    pub fn new(output_file: impl Into<PathBuf>) -> Self {
        Self {
            output_file: output_file.into(),
            write_timeout: DEFAULT_WRITE_TIMEOUT,
        }
    }

    /// Directory that receives the batch files.
    pub fn artifact_dir(&self) -> PathBuf {
        match self.output_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

/// Event sink that turns lifecycle notifications into a JSON batch.
#[derive(Debug)]
pub struct Collector {
    artifact_dir: PathBuf,
    write_timeout: Duration,
    results: Vec<TestResultRecord>,
    completed: bool,
}

impl Collector {
    /// Create a collector, preparing the artifact directory up front.
    ///
    /// A directory that cannot be created is logged; the flush tries again
    /// and reports the failure then.
    pub fn new(config: CollectorConfig) -> Self {
        let artifact_dir = config.artifact_dir();
        if let Err(e) = std::fs::create_dir_all(&artifact_dir) {
            tracing::warn!(dir = %artifact_dir.display(), error = %e, "cannot create artifact directory");
        }
        Self {
            artifact_dir,
            write_timeout: config.write_timeout,
            results: Vec::new(),
            completed: false,
        }
    }

    pub fn artifact_dir(&self) -> &Path {
        &self.artifact_dir
    }

    /// Records accumulated so far, in completion order.
    pub fn results(&self) -> &[TestResultRecord] {
        &self.results
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Record one test outcome, stamped with the current time.
    pub fn on_test_completed(&mut self, test: &TestDescriptor, status: Status) {
        self.record_at(test, status, Utc::now());
    }

    pub(crate) fn record_at(&mut self, test: &TestDescriptor, status: Status, now: DateTime<Utc>) {
        let suite_name = suite_or_default(test.parent.as_deref()).to_string();
        let test_name = if test.title.is_empty() {
            UNTITLED_TEST.to_string()
        } else {
            test.title.clone()
        };
        let error = test
            .error
            .as_ref()
            .map(|e| sanitize_error(&e.message))
            .unwrap_or_default();

        tracing::debug!(suite = %suite_name, test = %test_name, %status, "test completed");
        self.results
            .push(TestResultRecord::new(suite_name, test_name, status, error).at(now));
    }

    /// Flush the run to `test-report-<timestamp>.json`.
    ///
    /// Returns the path written. Only the first call writes; later calls fail
    /// with [`Error::RunAlreadyCompleted`].
    pub fn on_run_completed(&mut self) -> Result<PathBuf> {
        self.flush_at(Utc::now())
    }

    pub(crate) fn flush_at(&mut self, completed_at: DateTime<Utc>) -> Result<PathBuf> {
        if self.completed {
            return Err(Error::RunAlreadyCompleted);
        }
        self.completed = true;

        let stem = report_file_stem(&completed_at);
        let contents = serde_json::to_vec_pretty(&self.results).map_err(|source| Error::Json {
            path: self.artifact_dir.join(format!("{stem}.json")),
            source,
        })?;

        match write_new_file(
            &self.artifact_dir,
            &stem,
            "json",
            contents,
            self.write_timeout,
        ) {
            Ok(path) => {
                tracing::info!(path = %path.display(), records = self.results.len(), "json report written");
                Ok(path)
            }
            Err(e) => {
                tracing::error!(dir = %self.artifact_dir.display(), error = %e, "failed to write json report");
                Err(e)
            }
        }
    }
}

impl LifecycleListener for Collector {
    fn on_test_passed(&mut self, test: &TestDescriptor) {
        self.on_test_completed(test, Status::Passed);
    }

    fn on_test_failed(&mut self, test: &TestDescriptor) {
        self.on_test_completed(test, Status::Failed);
    }
}

/// File stem for a run completed at `completed_at`.
///
/// Colons are not portable in file names and become dashes:
/// `test-report-2026-01-20T09-15-02.123Z`.
pub fn report_file_stem(completed_at: &DateTime<Utc>) -> String {
    format!(
        "{REPORT_FILE_PREFIX}{}",
        format_timestamp(completed_at).replace(':', "-")
    )
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
