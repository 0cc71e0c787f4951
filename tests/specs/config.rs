//! Behavioral specs for resultsheet.toml and environment variables.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > [report] keys replace the built-in defaults
#[test]
fn report_table_sets_paths() {
    let temp = Project::empty();
    temp.copy_fixture("report/mixed", "results");
    temp.config(
        r#"
[report]
input = "results"
output = "artifacts/tests.xlsx"
summary_dir = "artifacts"
"#,
    );

    report().pwd(temp.path()).args(&["--no-color"]).passes();

    assert!(temp.read_bytes("artifacts/tests.xlsx").starts_with(b"PK"));
    assert!(temp.read("artifacts/test-summary.txt").starts_with("Total Tests: 3"));
}

/// > [collect] output_file picks the batch directory
#[test]
fn collect_table_sets_directory() {
    let temp = Project::empty();
    temp.config("[collect]\noutput_file = \"batches/results.json\"\n");

    collect()
        .pwd(temp.path())
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    assert_eq!(temp.json_files("batches").len(), 1);
}

/// > CLI flags override config values
#[test]
fn flags_override_config() {
    let temp = Project::empty();
    temp.copy_fixture("report/mixed", "results");
    temp.config("[report]\ninput = \"results\"\noutput = \"from-config.xlsx\"\n");

    report()
        .pwd(temp.path())
        .args(&["-o", "from-flag.xlsx", "--no-color"])
        .passes();

    assert!(temp.path().join("from-flag.xlsx").exists());
    assert!(!temp.path().join("from-config.xlsx").exists());
}

/// > Config is discovered from a subdirectory up to the git root
#[test]
fn config_discovered_from_subdirectory() {
    let temp = Project::empty();
    temp.config("[collect]\noutput_file = \"batches/results.json\"\n");
    temp.file("nested/deeper/.keep", "");

    collect()
        .pwd(temp.path().join("nested/deeper"))
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    // Relative paths resolve against the working directory.
    assert_eq!(temp.json_files("nested/deeper/batches").len(), 1);
}

/// > RESULTSHEET_CONFIG selects the config file
#[test]
fn env_config_sets_path() {
    let temp = Project::empty();
    temp.file(
        "ci/resultsheet-ci.toml",
        "version = 1\n[collect]\noutput_file = \"ci-batches/results.json\"\n",
    );

    collect()
        .pwd(temp.path())
        .env(
            "RESULTSHEET_CONFIG",
            temp.path().join("ci/resultsheet-ci.toml").to_str().unwrap(),
        )
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    assert_eq!(temp.json_files("ci-batches").len(), 1);
}

/// > -C points at an explicit config file
#[test]
fn config_flag_sets_path() {
    let temp = Project::empty();
    temp.file(
        "alt.toml",
        "version = 1\n[collect]\noutput_file = \"alt/results.json\"\n",
    );

    collect()
        .pwd(temp.path())
        .args(&["-C", "alt.toml"])
        .stdin("{\"event\":\"run_ended\"}\n")
        .passes();

    assert_eq!(temp.json_files("alt").len(), 1);
}

/// > Exit code 2 for a missing explicit config
#[test]
fn missing_explicit_config_exits_2() {
    let temp = Project::empty();

    report()
        .pwd(temp.path())
        .args(&["-C", "missing.toml"])
        .exits(2)
        .stderr_has("config file not found");
}

/// > Exit code 2 for an unsupported version
#[test]
fn unsupported_version_exits_2() {
    let temp = Project::empty();
    temp.config("version = 7\n");

    report()
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 7");
}

/// > Unknown keys warn and are ignored
#[test]
fn unknown_keys_warn() {
    let temp = Project::empty();
    temp.config("theme = \"dark\"\n[report]\nshiny = true\n");
    temp.file("reports/json/.keep", "");

    report()
        .pwd(temp.path())
        .args(&["--no-color"])
        .passes()
        .stderr_has("unrecognized field `theme`")
        .stderr_has("unrecognized field `report.shiny`");
}

/// > RESULTSHEET_LOG enables diagnostic logging on stderr
#[test]
fn env_log_enables_tracing() {
    let temp = Project::empty();

    collect()
        .pwd(temp.path())
        .env("RESULTSHEET_LOG", "debug")
        .stdin("{\"event\":\"test_passed\",\"title\":\"a\"}\n{\"event\":\"run_ended\"}\n")
        .passes()
        .stderr_has("test completed");
}
