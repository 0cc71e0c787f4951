// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test result records shared by the collector and the report builder.
//!
//! A record is one completed test case. The collector writes records as a
//! flat JSON array; the report builder reads any number of such arrays back.

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Suite name used when a test has no enclosing suite.
pub const DEFAULT_SUITE: &str = "Default Suite";

/// Outcome of a single test case.
///
/// Only `Passed` and `Failed` are produced by the collector. Ingested files may
/// carry any label; unrecognized labels are preserved verbatim in `Other`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Passed,
    Failed,
    #[default]
    Unknown,
    Other(String),
}

impl Status {
    /// The label as written to JSON and to the Status column.
    pub fn as_str(&self) -> &str {
        match self {
            Status::Passed => "PASSED",
            Status::Failed => "FAILED",
            Status::Unknown => "UNKNOWN",
            Status::Other(label) => label,
        }
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Status::Passed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Status::Failed)
    }
}

impl From<String> for Status {
    fn from(label: String) -> Self {
        match label.as_str() {
            "PASSED" => Status::Passed,
            "FAILED" => Status::Failed,
            "UNKNOWN" => Status::Unknown,
            _ => Status::Other(label),
        }
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One completed test case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResultRecord {
    /// Collection time. Written by the collector, ignored by the report builder.
    #[serde(default, skip_serializing_if = "Option::is_none", with = "timestamp")]
    pub timestamp: Option<DateTime<Utc>>,
    pub suite_name: String,
    pub test_name: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub error: String,
}

impl TestResultRecord {
    /// Create an untimestamped record.
    pub fn new(
        suite_name: impl Into<String>,
        test_name: impl Into<String>,
        status: Status,
        error: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: None,
            suite_name: suite_name.into(),
            test_name: test_name.into(),
            status,
            error: error.into(),
        }
    }

    /// Stamp the record with a collection time.
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }
}

/// ISO-8601 instants with millisecond precision and a `Z` suffix.
mod timestamp {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(ts) => serializer.serialize_str(&super::format_timestamp(ts)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw {
            None => Ok(None),
            Some(s) => DateTime::parse_from_rfc3339(&s)
                .map(|ts| Some(ts.with_timezone(&Utc)))
                .map_err(serde::de::Error::custom),
        }
    }
}

/// Format an instant as `2026-01-20T09:15:02.123Z`.
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// ANSI CSI sequences (7-bit `ESC [` or the 8-bit CSI introducer).
#[allow(clippy::expect_used)]
static ANSI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\x1b\[|\x{9b}\[?)[0-9;?]*[A-Za-z]").expect("valid regex")
});

/// Trailing `suite<digits>` appended by sharded runs.
#[allow(clippy::expect_used)]
static SUITE_SUFFIX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)suite\d+$").expect("valid regex"));

/// Reduce an error message to a single terminal-color-free line.
///
/// Strips ANSI escape sequences, keeps the text before the first newline
/// (dropping any stack trace) and trims surrounding whitespace.
pub fn sanitize_error(message: &str) -> String {
    let mut stripped = message.to_string();
    // Removing one sequence can splice the halves of another together.
    while ANSI_PATTERN.is_match(&stripped) {
        stripped = ANSI_PATTERN.replace_all(&stripped, "").into_owned();
    }
    stripped
        .split('\n')
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Remove a trailing `suite<digits>` added by sharded execution.
///
/// `"Checkout suite3"` becomes `"Checkout "`; the surrounding space is kept.
pub fn strip_suite_suffix(suite_name: &str) -> String {
    SUITE_SUFFIX_PATTERN.replace(suite_name, "").into_owned()
}

/// Fall back to [`DEFAULT_SUITE`] for missing or empty suite names.
pub fn suite_or_default(suite_name: Option<&str>) -> &str {
    match suite_name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_SUITE,
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
