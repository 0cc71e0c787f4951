//! Behavioral specs for `resultsheet collect`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

fn only_batch(temp: &Project, dir: &str) -> serde_json::Value {
    let files = temp.json_files(dir);
    assert_eq!(files.len(), 1, "expected one batch file, got {files:?}");
    serde_json::from_str(&temp.read(format!("{dir}/{}", files[0]))).unwrap()
}

/// > Each run writes one test-report-<timestamp>.json next to the output file
#[test]
fn writes_timestamped_batch() {
    let temp = Project::empty();

    let run = collect()
        .pwd(temp.path())
        .args(&["--events"])
        .arg_path(fixture("collect/run.ndjson"))
        .passes();

    let files = temp.json_files("reports/json");
    assert_eq!(files.len(), 1);
    let name = &files[0];
    assert!(
        predicates::str::is_match(r"^test-report-\d{4}-\d{2}-\d{2}T\d{2}-\d{2}-\d{2}\.\d{3}Z\.json$")
            .unwrap()
            .eval(name),
        "unexpected file name: {name}"
    );
    assert!(run.stdout().trim_end().ends_with(name.as_str()));
}

/// > Records keep completion order, default the suite and sanitize errors
#[test]
fn records_are_normalized() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--events"])
        .arg_path(fixture("collect/run.ndjson"))
        .passes();

    let batch = only_batch(&temp, "reports/json");
    let records = batch.as_array().unwrap();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["suiteName"], "Login");
    assert_eq!(records[0]["testName"], "accepts valid password");
    assert_eq!(records[0]["status"], "PASSED");
    assert_eq!(records[0]["error"], "");

    assert_eq!(records[1]["status"], "FAILED");
    assert_eq!(records[1]["error"], "Expected banner");

    assert_eq!(records[2]["suiteName"], "Default Suite");
}

/// > Batch files validate against docs/specs/test-report.schema.json
#[test]
fn batch_validates_against_schema() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--events"])
        .arg_path(fixture("collect/run.ndjson"))
        .passes();

    let batch = only_batch(&temp, "reports/json");
    let compiled =
        jsonschema::validator_for(&schema("test-report.schema.json")).expect("schema should be valid");
    assert!(
        compiled.is_valid(&batch),
        "batch should validate against schema"
    );
}

/// > Events arrive on stdin when --events is absent
#[test]
fn reads_events_from_stdin() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .stdin("{\"event\":\"test_passed\",\"title\":\"a\",\"parent\":\"S\"}\n{\"event\":\"run_ended\"}\n")
        .passes()
        .stderr_lacks("warning");

    assert_eq!(only_batch(&temp, "reports/json").as_array().unwrap().len(), 1);
}

/// > A run with no tests writes an empty array
#[test]
fn empty_run_writes_empty_array() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    assert_eq!(only_batch(&temp, "reports/json"), serde_json::json!([]));
}

/// > End of input without run_ended still flushes, with a warning
#[test]
fn missing_run_ended_still_flushes() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--events"])
        .arg_path(fixture("collect/no-end.ndjson"))
        .passes()
        .stderr_has("without run_ended");

    assert_eq!(only_batch(&temp, "reports/json").as_array().unwrap().len(), 1);
}

/// > Malformed lines and late events are skipped with warnings
#[test]
fn malformed_and_late_events_are_skipped() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--events"])
        .arg_path(fixture("collect/malformed.ndjson"))
        .passes()
        .stderr_has("line 2: malformed event")
        .stderr_has("line 3: malformed event")
        .stderr_has("1 event(s) after run_ended ignored");

    let batch = only_batch(&temp, "reports/json");
    let titles: Vec<_> = batch
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["testName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["first", "third"]);
}

/// > --output-file picks the artifact directory
#[test]
fn output_file_flag_sets_directory() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--output-file", "out/batches/results.json"])
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    assert_eq!(temp.json_files("out/batches").len(), 1);
}

/// > Repeated runs never overwrite earlier batches
#[test]
fn repeated_runs_accumulate() {
    let temp = Project::empty();

    for _ in 0..3 {
        collect()
            .pwd(temp.path())
            .stdin("{\"event\":\"run_ended\"}\n")
            .passes();
    }

    assert_eq!(temp.json_files("reports/json").len(), 3);
}

/// > Exit code 1 when the batch cannot be written
#[test]
fn unwritable_directory_exits_1() {
    let temp = Project::empty();
    temp.file("blocked", "a file, not a directory");

    collect()
        .pwd(temp.path())
        .args(&["--output-file", "blocked/results.json"])
        .stdin("{\"event\":\"run_ended\"}\n")
        .exits(1)
        .stderr_has("resultsheet: error:");
}

/// > Exit code 2 when the events file does not exist
#[test]
fn missing_events_file_exits_2() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .args(&["--events", "nope.ndjson"])
        .exits(2)
        .stderr_has("cannot open events file");
}
