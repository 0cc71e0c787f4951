//! Behavioral specs for `resultsheet report`.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Merges every batch into a two-sheet workbook
#[test]
fn writes_workbook_from_fixture() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "out/report.xlsx", "--no-color"])
        .passes()
        .stdout_has("report: out/report.xlsx")
        .stdout_has("FAIL Total Tests: 3, Passed Tests: 2, Failed Tests: 1");

    let bytes = temp.read_bytes("out/report.xlsx");
    assert_eq!(xlsx_sheet_names(&bytes), ["Test Results", "Summary"]);
    let results = xlsx_part(&bytes, "xl/worksheets/sheet1.xml");
    assert!(results.contains(r#"<mergeCell ref="A2:A3"/>"#), "{results}");
    assert_eq!(results.matches("<mergeCell ").count(), 1);
}

/// > Text summary is a single line in <dir>/test-summary.txt
#[test]
fn writes_text_summary() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "report.xlsx", "--summary-dir", "ci", "--no-color"])
        .passes()
        .stdout_eq(
            "summary: ci/test-summary.txt\n\
             report: report.xlsx\n\
             FAIL Total Tests: 3, Passed Tests: 2, Failed Tests: 1\n",
        );

    assert_eq!(
        temp.read("ci/test-summary.txt"),
        "Total Tests: 3, Passed Tests: 2, Failed Tests: 1"
    );
}

/// > Elements without a testName are skipped; missing status counts toward the total only
#[test]
fn normalizes_ingested_records() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/interleaved"))
        .args(&["-o", "report.xlsx", "--summary-dir", ".", "--no-color"])
        .passes()
        .stderr_has("b.json")
        .stdout_has("Total Tests: 4, Passed Tests: 2, Failed Tests: 1");
}

/// > Unreadable, invalid and non-array files are skipped with a warning
#[test]
fn damaged_files_are_skipped() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/damaged"))
        .args(&["-o", "report.xlsx", "--no-color"])
        .passes()
        .stderr_has("b-truncated.json")
        .stderr_has("c-object.json")
        .stderr_lacks("notes.txt")
        .stdout_has("PASS Total Tests: 1, Passed Tests: 1, Failed Tests: 0");
}

/// > An empty folder still produces a workbook with zero counts
#[test]
fn empty_folder_produces_empty_report() {
    let temp = Project::empty();
    temp.file("reports/json/.keep", "");

    report()
        .pwd(temp.path())
        .args(&["--no-color"])
        .passes()
        .stdout_has("PASS Total Tests: 0, Passed Tests: 0, Failed Tests: 0");

    assert!(temp.read_bytes("reports/test-report.xlsx").starts_with(b"PK"));
}

/// > A missing input folder is an error, not an empty report
#[test]
fn missing_input_folder_fails() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .args(&["does-not-exist"])
        .exits(1)
        .stderr_has("does-not-exist");
}

/// > Exit code 1 when the spreadsheet cannot be written
#[test]
fn unwritable_output_exits_1() {
    let temp = Project::empty();
    temp.file("blocked", "");

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "blocked/report.xlsx", "--no-color"])
        .exits(1)
        .stderr_has("resultsheet: error:")
        .stdout_has("Total Tests: 3");
}

/// > Re-running replaces the previous report and summary
#[test]
fn rerun_replaces_outputs() {
    let temp = Project::empty();
    temp.copy_fixture("report/mixed", "reports/json");
    temp.file("reports/test-summary.txt", "stale summary from an older run\n");

    report()
        .pwd(temp.path())
        .args(&["--summary-dir", "reports"])
        .passes();

    assert_eq!(
        temp.read("reports/test-summary.txt"),
        "Total Tests: 3, Passed Tests: 2, Failed Tests: 1"
    );
}

// =============================================================================
// COLOR SPECS
// =============================================================================

/// > NO_COLOR disables color output
#[test]
fn no_color_env_disables_color() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "report.xlsx"])
        .env("NO_COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

/// > COLOR forces color output even without a TTY
#[test]
fn color_env_forces_color() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "report.xlsx"])
        .env("COLOR", "1")
        .passes()
        .stdout_has("\x1b[");
}

/// > --no-color wins over COLOR
#[test]
fn no_color_flag_wins_over_env() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .arg_path(fixture("report/mixed"))
        .args(&["-o", "report.xlsx", "--no-color"])
        .env("COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}
