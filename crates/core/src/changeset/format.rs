// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line codecs for the change-set text format
//!
//! ```text
//! <directory-path> <file-count>
//! <newSHA> <oldSHA> <file-path> <type-code>      (file-count times)
//! <blank line>
//! ```
//!
//! The last whitespace-delimited token of a group header is the count and
//! everything before it is the directory, so directories may contain spaces.
//! Detail lines are a fixed four-token split, so file paths and digests may
//! not.

use super::entry::{FileEntry, NO_DIGEST};
use super::error::ChangeSetError;
use crate::category::DriftCategory;
use std::io::BufRead;

/// Line-at-a-time reader with one line of pushback
///
/// Line numbers are 1-based and refer to the last line handed out.
pub(crate) struct LineSource<R> {
    inner: R,
    line: u64,
    pending: Option<String>,
}

impl<R: BufRead> LineSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        Self {
            inner,
            line: 0,
            pending: None,
        }
    }

    /// Next line without its terminator, or `None` at end of input
    ///
    /// A line that is not UTF-8 is still consumed and counted, then reported
    /// as `InvalidEncoding` so callers can treat it as content damage.
    pub(crate) fn next_line(&mut self) -> Result<Option<String>, ChangeSetError> {
        if let Some(line) = self.pending.take() {
            self.line += 1;
            return Ok(Some(line));
        }

        let mut buf = Vec::new();
        if self.inner.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        String::from_utf8(buf)
            .map(Some)
            .map_err(|_| ChangeSetError::InvalidEncoding { line: self.line })
    }

    /// Return a line so the next call to `next_line` yields it again
    pub(crate) fn push_back(&mut self, line: String) {
        self.line = self.line.saturating_sub(1);
        self.pending = Some(line);
    }

    pub(crate) fn line_number(&self) -> u64 {
        self.line
    }

    pub(crate) fn into_inner(self) -> R {
        self.inner
    }
}

/// Split a group header into its directory and declared file count
pub fn parse_group_header(line: &str) -> Option<(&str, usize)> {
    let trimmed = line.trim();
    let split = trimmed.rfind(char::is_whitespace)?;
    let (directory, count) = trimmed.split_at(split);
    let directory = directory.trim_end();
    let count = count.trim_start();

    if directory.is_empty() || count.is_empty() || !count.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let count = count.parse().ok()?;
    Some((directory, count))
}

pub fn encode_group_header(directory: &str, count: usize) -> String {
    format!("{} {}", directory, count)
}

/// Decode a `newSHA oldSHA file type-code` detail line
pub fn parse_file_entry(line: &str, line_number: u64) -> Result<FileEntry, ChangeSetError> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [new_sha, old_sha, file, code] = tokens.as_slice() else {
        return Err(ChangeSetError::MalformedFileEntry {
            line: line_number,
            reason: format!("expected 4 fields, found {}", tokens.len()),
        });
    };

    let category =
        DriftCategory::from_code(code).map_err(|e| ChangeSetError::UnknownCategory {
            line: line_number,
            code: e.0,
        })?;

    FileEntry::from_parts(
        category,
        (*file).to_string(),
        (*old_sha).to_string(),
        (*new_sha).to_string(),
    )
    .map_err(|reason| ChangeSetError::MalformedFileEntry {
        line: line_number,
        reason: format!("{reason}: {file}"),
    })
}

pub fn encode_file_entry(entry: &FileEntry) -> String {
    format!(
        "{} {} {} {}",
        entry.new_sha(),
        entry.old_sha(),
        entry.file(),
        entry.category().code()
    )
}

/// Check that a directory path survives the group header round trip
pub fn validate_directory(directory: &str) -> Result<(), ChangeSetError> {
    let reason = if directory.trim().is_empty() {
        Some("directory path is empty")
    } else if directory.contains(['\n', '\r']) {
        Some("directory path contains a line break")
    } else if directory.trim() != directory {
        Some("directory path has leading or trailing whitespace")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(ChangeSetError::InvalidPath {
            path: directory.to_string(),
            reason,
        }),
        None => Ok(()),
    }
}

/// Check that a file entry fits the fixed four-token detail line
pub fn validate_file_entry(entry: &FileEntry) -> Result<(), ChangeSetError> {
    let file = entry.file();
    if file.is_empty() {
        return Err(ChangeSetError::InvalidPath {
            path: file.to_string(),
            reason: "file path is empty",
        });
    }
    if file.contains(char::is_whitespace) {
        return Err(ChangeSetError::InvalidPath {
            path: file.to_string(),
            reason: "file path contains whitespace",
        });
    }

    let digests = match entry {
        FileEntry::Added { new_sha, .. } => vec![new_sha],
        FileEntry::Changed {
            old_sha, new_sha, ..
        } => vec![old_sha, new_sha],
        FileEntry::Removed { old_sha, .. } => vec![old_sha],
    };
    for digest in digests {
        if digest.is_empty() || digest == NO_DIGEST || digest.contains(char::is_whitespace) {
            return Err(ChangeSetError::InvalidDigest {
                file: file.to_string(),
                digest: digest.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "format_tests.rs"]
mod tests;
