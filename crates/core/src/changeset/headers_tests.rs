// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::io::Cursor;
use yare::parameterized;

fn sample_headers() -> Headers {
    Headers::new("etc-config", "/etc", DriftChangeSetCategory::Coverage)
        .with_resource_id(10001)
        .with_definition_id(7)
        .with_version(3)
}

fn read(text: &str) -> Result<Headers, ChangeSetError> {
    let mut lines = LineSource::new(Cursor::new(text.to_string()));
    Headers::read_block(&mut lines)
}

#[test]
fn block_lists_every_field_in_order() {
    assert_eq!(
        sample_headers().to_block(),
        "resource-id: 10001\n\
         definition-id: 7\n\
         definition-name: etc-config\n\
         basedir: /etc\n\
         type: C\n\
         version: 3\n\
         \n"
    );
}

#[test]
fn block_reads_back_what_was_written() {
    let headers = sample_headers();
    assert_eq!(read(&headers.to_block()).unwrap(), headers);
}

#[test]
fn block_reads_keys_in_any_order() {
    let text = "type: D\nbasedir: /opt/app\nversion: 12\ndefinition-name: app\n\n";
    let headers = read(text).unwrap();

    assert_eq!(headers.category, DriftChangeSetCategory::Drift);
    assert_eq!(headers.basedir, "/opt/app");
    assert_eq!(headers.version, 12);
    assert_eq!(headers.resource_id, 0);
    assert_eq!(headers.definition_id, 0);
    assert!(!headers.is_coverage());
}

#[test]
fn block_keeps_colons_inside_values() {
    let text = "definition-name: win\nbasedir: C:\\Program Files\\app\ntype: C\n\n";
    let headers = read(text).unwrap();
    assert_eq!(headers.basedir, "C:\\Program Files\\app");
}

#[test]
fn block_ignores_unknown_keys() {
    let text = "definition-name: a\nbasedir: /a\ntype: C\nchecksum: abc\n\n";
    assert!(read(text).is_ok());
}

#[test]
fn block_stops_at_blank_line() {
    let text = "definition-name: a\nbasedir: /a\ntype: C\n\n/etc 0\n\n";
    let mut lines = LineSource::new(Cursor::new(text.to_string()));
    Headers::read_block(&mut lines).unwrap();

    assert_eq!(lines.line_number(), 4);
    assert_eq!(lines.next_line().unwrap().as_deref(), Some("/etc 0"));
}

#[parameterized(
    missing_name = { "basedir: /a\ntype: C\n\n" },
    missing_basedir = { "definition-name: a\ntype: C\n\n" },
    missing_type = { "definition-name: a\nbasedir: /a\n\n" },
    empty_name = { "definition-name:\nbasedir: /a\ntype: C\n\n" },
    bad_type = { "definition-name: a\nbasedir: /a\ntype: X\n\n" },
    bad_number = { "definition-name: a\nbasedir: /a\ntype: C\nversion: one\n\n" },
    duplicate = { "definition-name: a\ndefinition-name: b\nbasedir: /a\ntype: C\n\n" },
    no_separator = { "definition-name a\nbasedir: /a\ntype: C\n\n" },
    no_space_after_colon = { "definition-name: a\nbasedir: /a\ntype:C\n\n" },
    unterminated = { "definition-name: a\nbasedir: /a\ntype: C\n" },
    empty_stream = { "" },
)]
fn block_rejects_corrupt_headers(text: &str) {
    assert!(matches!(
        read(text),
        Err(ChangeSetError::CorruptHeaders { .. })
    ));
}

#[test]
fn corrupt_headers_report_line_number() {
    let err = read("definition-name: a\nversion: x\n\n").unwrap_err();
    match err {
        ChangeSetError::CorruptHeaders { line, .. } => assert_eq!(line, 2),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn validate_accepts_sample_headers() {
    assert!(sample_headers().validate().is_ok());
}

#[parameterized(
    empty_name = { "", "/etc" },
    name_with_newline = { "a\nb", "/etc" },
    padded_basedir = { "a", " /etc" },
    empty_basedir = { "a", "" },
)]
fn validate_rejects_unwritable_values(name: &str, basedir: &str) {
    let headers = Headers::new(name, basedir, DriftChangeSetCategory::Drift);
    assert!(matches!(
        headers.validate(),
        Err(ChangeSetError::InvalidHeader { .. })
    ));
}
