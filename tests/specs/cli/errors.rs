//! CLI error specs
//!
//! Failures print `error:` with context on stderr and exit 1.

use crate::prelude::*;

#[test]
fn missing_file_reports_context() {
    let temp = Project::empty();

    temp.drift()
        .args(&["validate", "nope.txt"])
        .fails()
        .stderr_has("error: invalid change set nope.txt");
}

#[test]
fn missing_definition_reports_path() {
    let temp = Project::empty();

    temp.drift()
        .args(&["detect", "--definition", "missing.toml", "--store", "store"])
        .fails()
        .stderr_has("error: failed to load definition missing.toml");
}

#[test]
fn unknown_definition_key_is_rejected() {
    let temp = Project::empty();
    temp.file("bad.toml", "name = \"x\"\nbasedir = \"/\"\nfollow_symlinks = true\n");

    temp.drift()
        .args(&["detect", "--definition", "bad.toml", "--store", "store"])
        .fails()
        .stderr_has("follow_symlinks");
}

#[test]
fn unknown_format_is_a_usage_error() {
    let temp = Project::empty();

    let output = temp
        .drift()
        .args(&["--format", "yaml", "validate", "x"])
        .output();
    assert_eq!(output.status.code(), Some(2));
}
