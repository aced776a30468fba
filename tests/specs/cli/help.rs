//! CLI help specs
//!
//! Verify the command surface is discoverable.

use crate::prelude::*;

#[test]
fn help_lists_commands() {
    let temp = Project::empty();

    temp.drift()
        .args(&["--help"])
        .passes()
        .stdout_has("detect")
        .stdout_has("show")
        .stdout_has("diff")
        .stdout_has("validate")
        .stdout_has("purge");
}

#[test]
fn detect_help_documents_flags() {
    let temp = Project::empty();

    temp.drift()
        .args(&["detect", "--help"])
        .passes()
        .stdout_has("--definition")
        .stdout_has("--store");
}

#[test]
fn version_prints_crate_version() {
    let temp = Project::empty();

    temp.drift()
        .args(&["--version"])
        .passes()
        .stdout_has("drift ");
}
