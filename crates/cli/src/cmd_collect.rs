// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Collect command implementation.

use std::fs::File;
use std::io::BufReader;

use resultsheet::cli::{Cli, CollectArgs};
use resultsheet::collector::{Collector, CollectorConfig, Replay, replay};
use resultsheet::config;
use resultsheet::error::{Error, ExitCode};

/// Run the collect command.
pub fn run(cli: &Cli, args: &CollectArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let config = config::resolve(cli.config.as_deref(), &cwd)?;

    // CLI flag overrides config
    let output_file = args
        .output_file
        .clone()
        .unwrap_or(config.collect.output_file);
    let mut collector = Collector::new(CollectorConfig {
        output_file,
        write_timeout: config.write_timeout,
    });

    let outcome = match &args.events {
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                Error::Argument(format!("cannot open events file {}: {e}", path.display()))
            })?;
            replay(BufReader::new(file), &mut collector)
        }
        None => replay(std::io::stdin().lock(), &mut collector),
    };
    report_replay(&outcome);

    match collector.on_run_completed() {
        Ok(path) => {
            println!("{}", path.display());
            Ok(ExitCode::Success)
        }
        Err(e) => {
            eprintln!("resultsheet: error: {e}");
            Ok(ExitCode::from(&e))
        }
    }
}

/// Surface stream problems; none of them stop the flush.
fn report_replay(outcome: &Replay) {
    for malformed in &outcome.malformed {
        eprintln!(
            "resultsheet: warning: line {}: malformed event (skipped): {}",
            malformed.line, malformed.reason
        );
    }
    if let Some(e) = &outcome.read_error {
        eprintln!("resultsheet: warning: event stream read failed: {e}");
    }
    if outcome.ignored_after_end > 0 {
        eprintln!(
            "resultsheet: warning: {} event(s) after run_ended ignored",
            outcome.ignored_after_end
        );
    }
    if !outcome.run_ended {
        eprintln!("resultsheet: warning: input ended without run_ended; flushing collected results");
    }
    tracing::debug!(
        dispatched = outcome.dispatched,
        run_ended = outcome.run_ended,
        "event stream replayed"
    );
}
