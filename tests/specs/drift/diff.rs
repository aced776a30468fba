//! Drift diff specs
//!
//! Verify comparison of coverage files and stores.

use crate::prelude::*;

const OTHER_COVERAGE: &str = "\
definition-name: etc-config
basedir: /etc
type: C

. 2
h2 0 hosts A
g1 0 group A

";

#[test]
fn diff_of_two_coverage_files() {
    let temp = Project::empty();
    temp.file("old.txt", COVERAGE);
    temp.file("new.txt", OTHER_COVERAGE);

    temp.drift()
        .args(&["diff", "old.txt", "new.txt"])
        .passes()
        .stdout_eq("A group g1\nC hosts h2\nR passwd p1\nR ssh/sshd_config s1\n");
}

#[test]
fn diff_of_identical_states_is_empty() {
    let temp = Project::empty();
    temp.file("a.txt", COVERAGE);

    temp.drift()
        .args(&["diff", "a.txt", "a.txt"])
        .passes()
        .stdout_eq("");
}

#[test]
fn diff_replays_store_directory() {
    let temp = Project::empty();
    temp.file("store/changeset-00000000.txt", COVERAGE);
    temp.file("store/changeset-00000001.txt", DRIFT);
    temp.file("old.txt", COVERAGE);

    temp.drift()
        .args(&["diff", "old.txt", "store"])
        .passes()
        .stdout_eq("C hosts h2\nR passwd p1\n");
}

#[test]
fn diff_json_lists_entries() {
    let temp = Project::empty();
    temp.file("old.txt", COVERAGE);
    temp.file("new.txt", OTHER_COVERAGE);

    let run = temp
        .drift()
        .args(&["--format", "json", "diff", "old.txt", "new.txt"])
        .passes();
    let json = run.json();

    assert_eq!(json.as_array().unwrap().len(), 4);
    assert_eq!(json[0]["category"], "file_added");
    assert_eq!(json[0]["path"], "group");
    assert_eq!(json[0]["size"], serde_json::Value::Null);
}

#[test]
fn diff_rejects_drift_file_alone() {
    let temp = Project::empty();
    temp.file("old.txt", COVERAGE);
    temp.file("drift.txt", DRIFT);

    temp.drift()
        .args(&["diff", "old.txt", "drift.txt"])
        .fails()
        .stderr_has("no coverage change set precedes it");
}

#[test]
fn diff_missing_path_fails() {
    let temp = Project::empty();
    temp.file("old.txt", COVERAGE);

    temp.drift()
        .args(&["diff", "old.txt", "absent"])
        .fails()
        .stderr_has("absent does not exist");
}
