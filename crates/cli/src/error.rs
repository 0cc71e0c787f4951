// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;
use std::time::Duration;

/// Resultsheet error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON (de)serialization error
    #[error("json error: {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Workbook rendering or save error
    #[error("spreadsheet error: {}: {source}", .path.display())]
    Xlsx {
        path: PathBuf,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// Sheet layout rejected by the workbook writer
    #[error("sheet error: {sheet}: {source}")]
    Sheet {
        sheet: &'static str,
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// A file write did not finish within the configured limit.
    #[error("write timed out after {timeout:?}: {}", .path.display())]
    WriteTimeout { path: PathBuf, timeout: Duration },

    /// The collector was asked to flush a run that already produced its file.
    #[error("run already completed")]
    RunAlreadyCompleted,

    /// The workbook was emitted before all of its sheets were built.
    #[error("report incomplete: {missing} sheet not built")]
    ReportIncomplete { missing: &'static str },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type using resultsheet Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Artifacts written
    Success = 0,
    /// An expected artifact could not be written
    WriteFailed = 1,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } | Error::Json { .. } | Error::Xlsx { .. } => ExitCode::WriteFailed,
            Error::WriteTimeout { .. } => ExitCode::WriteFailed,
            Error::Sheet { .. } => ExitCode::InternalError,
            Error::RunAlreadyCompleted | Error::ReportIncomplete { .. } => {
                ExitCode::InternalError
            }
            Error::Internal(_) => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
