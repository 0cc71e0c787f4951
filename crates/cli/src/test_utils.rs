//! Shared unit test utilities.
//!
//! Provides common helpers for unit tests in the cli crate.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use tempfile::TempDir;

use crate::record::{Status, TestResultRecord};

/// Creates a temp directory with a minimal resultsheet.toml.
pub fn temp_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("resultsheet.toml"), "version = 1\n").unwrap();
    dir
}

/// Creates a directory tree from a list of (path, content) pairs.
///
/// Parent directories are created automatically.
pub fn create_tree(root: &Path, files: &[(&str, &str)]) {
    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(full_path, content).unwrap();
    }
}

/// Shorthand for an untimestamped record.
pub fn record(suite: &str, test: &str, status: Status) -> TestResultRecord {
    TestResultRecord::new(suite, test, status, "")
}

/// Records for a suite sequence such as `["A", "A", "B", "A"]`, all passing.
pub fn records_for_suites(suites: &[&str]) -> Vec<TestResultRecord> {
    suites
        .iter()
        .enumerate()
        .map(|(i, suite)| record(suite, &format!("test {i}"), Status::Passed))
        .collect()
}

/// Read one XML part (e.g. `xl/workbook.xml`) out of a saved workbook.
pub fn xlsx_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}
