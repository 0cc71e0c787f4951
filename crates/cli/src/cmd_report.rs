// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.

use std::io::Write;
use std::path::Path;

use termcolor::{StandardStream, WriteColor};

use resultsheet::cli::{Cli, ReportArgs};
use resultsheet::color::{ColorMode, resolve_color, scheme};
use resultsheet::config;
use resultsheet::error::ExitCode;
use resultsheet::ingest::{self, IngestOptions};
use resultsheet::report::{ReportBuilder, SummaryStats};

/// Run the report command.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(cli.config.as_deref(), &cwd)?;

    // CLI flags override config
    let input = args.input.clone().unwrap_or(config.report.input);
    let output = args.output.clone().unwrap_or(config.report.output);
    let summary_dir = args.summary_dir.clone().or(config.report.summary_dir);
    let options = IngestOptions {
        sort_files: config.report.sort_files && !args.no_sort,
    };

    let ingestion = ingest::ingest_dir(&input, options)?;
    for skipped in &ingestion.skipped {
        eprintln!(
            "resultsheet: warning: {}: {} (skipped)",
            skipped.path.display(),
            skipped.reason
        );
    }

    let mut builder =
        ReportBuilder::from_ingestion(ingestion).with_write_timeout(config.write_timeout);
    let stats = builder.stats();
    builder.build_all()?;

    let mut stdout = StandardStream::stdout(resolve_color(ColorMode::from_flags(
        args.color,
        args.no_color,
    )));
    let mut exit_code = ExitCode::Success;

    // Text summary first: emitting the workbook consumes the builder.
    if let Some(dir) = &summary_dir {
        match builder.emit_text_summary(dir) {
            Ok(path) => write_artifact(&mut stdout, "summary", &path)?,
            Err(e) => {
                tracing::error!(dir = %dir.display(), error = %e, "text summary not written");
                eprintln!("resultsheet: error: {e}");
                exit_code = ExitCode::from(&e);
            }
        }
    }

    match builder.emit(&output) {
        Ok(path) => write_artifact(&mut stdout, "report", &path)?,
        Err(e) => {
            tracing::error!(path = %output.display(), error = %e, "spreadsheet not written");
            eprintln!("resultsheet: error: {e}");
            exit_code = ExitCode::from(&e);
        }
    }

    write_stats(&mut stdout, &stats)?;
    Ok(exit_code)
}

fn write_artifact(out: &mut impl WriteColor, label: &str, path: &Path) -> std::io::Result<()> {
    write!(out, "{label}: ")?;
    out.set_color(&scheme::path())?;
    write!(out, "{}", path.display())?;
    out.reset()?;
    writeln!(out)
}

/// `PASS`/`FAIL` followed by the one-line digest.
fn write_stats(out: &mut impl WriteColor, stats: &SummaryStats) -> std::io::Result<()> {
    if stats.has_failures() {
        out.set_color(&scheme::fail())?;
        write!(out, "FAIL")?;
    } else {
        out.set_color(&scheme::pass())?;
        write!(out, "PASS")?;
    }
    out.reset()?;
    writeln!(out, " {stats}")
}
