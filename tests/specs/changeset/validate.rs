//! Change-set validate specs
//!
//! Verify strict reading reports structure or the first corruption.

use crate::prelude::*;

#[test]
fn valid_file_reports_counts() {
    let temp = Project::empty();
    temp.file("cov.txt", COVERAGE);

    temp.drift()
        .args(&["validate", "cov.txt"])
        .passes()
        .stdout_eq("ok: COVERAGE v0, 2 groups, 3 files\n");
}

#[test]
fn truncated_file_fails() {
    let temp = Project::empty();
    let torn = COVERAGE.trim_end_matches('\n').trim_end_matches("s1 0 sshd_config A");
    temp.file("torn.txt", torn);

    temp.drift()
        .args(&["validate", "torn.txt"])
        .fails()
        .stderr_has("error: invalid change set torn.txt");
}

#[test]
fn unknown_category_code_fails() {
    let temp = Project::empty();
    temp.file("bad.txt", &format!("{COVERAGE}x 1\n1 0 f Z\n\n"));

    temp.drift().args(&["validate", "bad.txt"]).fails();
}

#[test]
fn missing_headers_fail() {
    let temp = Project::empty();
    temp.file("legacy.txt", ". 1\n1 0 hosts A\n\n");

    temp.drift().args(&["validate", "legacy.txt"]).fails();
}

#[test]
fn validate_json_report() {
    let temp = Project::empty();
    temp.file("drift.txt", DRIFT);

    let run = temp
        .drift()
        .args(&["validate", "--format", "json", "drift.txt"])
        .passes();
    let json = run.json();

    assert_eq!(json["category"], "drift");
    assert_eq!(json["groups"], 1);
    assert_eq!(json["files"], 2);
}
