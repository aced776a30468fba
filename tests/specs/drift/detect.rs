//! Drift detect specs
//!
//! Verify the coverage-then-drift lifecycle against a real directory.

use crate::prelude::*;

#[test]
fn first_detect_records_coverage() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/hosts", "127.0.0.1");
    temp.file("tracked/ssh/sshd_config", "Port 22");

    temp.detect()
        .passes()
        .stdout_has("COVERAGE change set v0 for etc (2 files, normal)")
        .stdout_has("  hosts\n")
        .stdout_has("  ssh/sshd_config\n");

    assert!(temp.read("store/changeset-00000000.txt").starts_with("resource-id: 5\n"));
}

#[test]
fn unchanged_tree_reports_no_drift() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/hosts", "127.0.0.1");
    temp.detect().passes();

    temp.detect().passes().stdout_eq("no drift detected\n");
}

#[test]
fn modified_tree_publishes_drift() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/hosts", "127.0.0.1");
    temp.file("tracked/passwd", "root");
    temp.detect().passes();

    temp.file("tracked/hosts", "10.0.0.1");
    temp.remove("tracked/passwd");
    temp.file("tracked/group", "wheel");

    temp.detect()
        .passes()
        .stdout_has("DRIFT change set v1 for etc (3 files, normal)");

    temp.drift()
        .args(&["show", "store/changeset-00000001.txt"])
        .passes()
        .stdout_has("type: D\n")
        .stdout_has("A group ")
        .stdout_has("C hosts ")
        .stdout_has("R passwd ");
}

#[test]
fn detect_json_summary() {
    let temp = Project::empty();
    temp.definition("planned_changes");
    temp.file("tracked/app.conf", "x=1");
    temp.detect().passes();
    temp.file("tracked/app.conf", "x=2");

    let run = temp.detect().args(&["--format", "json"]).passes();
    let json = run.json();

    assert_eq!(json["category"], "drift");
    assert_eq!(json["version"], 1);
    assert_eq!(json["resource_id"], 5);
    assert_eq!(json["handling_mode"], "planned_changes");
    assert_eq!(json["drift_paths"][0], "app.conf");
}

#[test]
fn no_drift_json_is_null() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/a", "1");
    temp.detect().passes();

    temp.detect()
        .args(&["--format", "json"])
        .passes()
        .stdout_eq("null\n");
}

#[test]
fn drift_is_logged_at_warn() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/a", "1");
    temp.detect().passes();
    temp.file("tracked/a", "2");

    temp.detect().passes().stderr_has("drift detected");
}

#[test]
fn log_filter_comes_from_environment() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/a", "1");

    temp.detect()
        .env("DRIFT_LOG", "info")
        .passes()
        .stderr_has("published change set");
}

#[test]
fn missing_basedir_fails() {
    let temp = Project::empty();
    temp.definition("normal");
    std::fs::remove_dir(temp.path().join("tracked")).unwrap();

    temp.detect()
        .fails()
        .stderr_has("error: drift detection failed")
        .stderr_has("is not a directory");
}

#[test]
fn pinned_definition_reports_against_pinned_version() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/hosts", "127.0.0.1");
    temp.file("tracked/passwd", "root");
    temp.detect().passes();
    temp.file("tracked/hosts", "10.0.0.1");
    temp.detect().passes();

    let definition = temp.read("etc.toml");
    temp.file("etc.toml", &format!("{definition}pinned_version = 0\n"));
    temp.file("tracked/passwd", "admin");

    temp.detect()
        .passes()
        .stdout_has("DRIFT change set v2 for etc (2 files, normal) against pinned v0")
        .stdout_has("  hosts\n")
        .stdout_has("  passwd\n");
}

#[test]
fn purge_then_detect_records_new_coverage() {
    let temp = Project::empty();
    temp.definition("normal");
    temp.file("tracked/hosts", "127.0.0.1");
    temp.detect().passes();
    temp.file("tracked/hosts", "10.0.0.1");
    temp.detect().passes();

    temp.drift()
        .args(&["purge", "--store", "store"])
        .passes()
        .stdout_eq("purged 2 change sets\n");

    temp.detect()
        .passes()
        .stdout_has("COVERAGE change set v0 for etc (1 files, normal)");
}

#[test]
fn purge_of_missing_store_fails() {
    let temp = Project::empty();

    temp.drift()
        .args(&["purge", "--store", "nowhere"])
        .fails()
        .stderr_has("store nowhere does not exist");
}
