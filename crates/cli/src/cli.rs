// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Collects test results as JSON batches and merges them into a spreadsheet report
#[derive(Parser)]
#[command(name = "resultsheet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "RESULTSHEET_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Record test lifecycle events into a timestamped JSON file
    Collect(CollectArgs),
    /// Merge JSON result files into a spreadsheet report
    Report(ReportArgs),
}

#[derive(clap::Args, Default)]
pub struct CollectArgs {
    /// Nominal result file; the JSON file is written next to it
    #[arg(long, value_name = "FILE")]
    pub output_file: Option<PathBuf>,

    /// Read NDJSON events from a file instead of stdin
    #[arg(long, value_name = "FILE")]
    pub events: Option<PathBuf>,
}

#[derive(clap::Args, Default)]
pub struct ReportArgs {
    /// Folder containing JSON result files
    #[arg(value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Spreadsheet output path
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also write test-summary.txt into this directory
    #[arg(long, value_name = "DIR")]
    pub summary_dir: Option<PathBuf>,

    /// Merge files in directory-listing order instead of by name
    #[arg(long)]
    pub no_sort: bool,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long, conflicts_with = "color")]
    pub no_color: bool,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
