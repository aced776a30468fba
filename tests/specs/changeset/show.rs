//! Change-set show specs
//!
//! Verify headers and entries are printed, strictly or leniently.

use crate::prelude::*;

#[test]
fn show_prints_headers_and_entries() {
    let temp = Project::empty();
    temp.file("cov.txt", COVERAGE);

    temp.drift().args(&["show", "cov.txt"]).passes().stdout_eq(
        "\
resource-id: 10001
definition-id: 7
definition-name: etc-config
basedir: /etc
type: C
version: 0

. 2
  A hosts h1
  A passwd p1
ssh 1
  A ssh/sshd_config s1
",
    );
}

#[test]
fn show_prints_removed_with_old_digest() {
    let temp = Project::empty();
    temp.file("drift.txt", DRIFT);

    temp.drift()
        .args(&["show", "drift.txt"])
        .passes()
        .stdout_has("type: D\n")
        .stdout_has("C hosts h2\n")
        .stdout_has("R passwd p1\n");
}

#[test]
fn show_json_carries_categories() {
    let temp = Project::empty();
    temp.file("drift.txt", DRIFT);

    let run = temp
        .drift()
        .args(&["--format", "json", "show", "drift.txt"])
        .passes();
    let json = run.json();

    assert_eq!(json["headers"]["category"], "drift");
    assert_eq!(json["headers"]["version"], 1);
    let files = &json["entries"][0]["files"];
    assert_eq!(files[0]["category"], "changed");
    assert_eq!(files[0]["old_sha"], "h1");
    assert_eq!(files[1]["category"], "removed");
    assert_eq!(json["skipped_groups"], 0);
}

#[test]
fn strict_show_fails_on_garbled_group() {
    let temp = Project::empty();
    temp.file("bad.txt", &format!("{COVERAGE}#garbled#\n1 0 x A\n\n"));

    temp.drift()
        .args(&["show", "bad.txt"])
        .fails()
        .stderr_has("error: failed to read change set bad.txt");
}

#[test]
fn lenient_show_skips_garbled_group() {
    let temp = Project::empty();
    temp.file(
        "bad.txt",
        &format!("{COVERAGE}#garbled#\n1 0 x A\n\nlib 1\nl1 0 libc.so A\n\n"),
    );

    temp.drift()
        .args(&["show", "--lenient", "bad.txt"])
        .passes()
        .stdout_has("A lib/libc.so l1\n")
        .stdout_has("(1 malformed groups skipped)")
        .stdout_lacks(" x ");
}

#[test]
fn show_lists_empty_groups() {
    let temp = Project::empty();
    temp.file("cov.txt", &format!("{COVERAGE}cache 0\n\n"));

    temp.drift()
        .args(&["show", "cov.txt"])
        .passes()
        .stdout_has("ssh 1\n  A ssh/sshd_config s1\ncache 0\n");
}
