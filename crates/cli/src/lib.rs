//! Test result collection and spreadsheet reporting.
//!
//! The [`collector`] turns test lifecycle events into timestamped JSON batch
//! files; [`ingest`] merges a folder of batches and [`report`] renders them
//! as a two-sheet workbook plus a one-line text summary.

pub mod cli;
pub mod collector;
pub mod color;
pub mod config;
pub mod discovery;
pub mod env;
pub mod error;
pub mod ingest;
pub mod record;
pub mod report;
pub mod write;

pub use cli::{Cli, CollectArgs, Command, ReportArgs};
pub use collector::{Collector, CollectorConfig, LifecycleEvent, LifecycleListener};
pub use color::ColorMode;
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use ingest::{IngestOptions, Ingestion, ingest_dir};
pub use record::{Status, TestResultRecord};
pub use report::{ReportBuilder, SummaryStats};

#[cfg(test)]
pub mod test_utils;
