// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Errors raised while reading or writing change-set files

use thiserror::Error;

/// Errors that can occur in change-set I/O
///
/// `Io` is a failure of the underlying stream. Every other variant describes
/// content that does not follow the change-set format.
#[derive(Debug, Error)]
pub enum ChangeSetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("corrupt change set headers at line {line}: {reason}")]
    CorruptHeaders { line: u64, reason: String },
    #[error("malformed directory entry header at line {line}: {content:?}")]
    MalformedGroupHeader { line: u64, content: String },
    #[error("truncated directory entry {directory}: expected {expected} files, found {found}")]
    Truncated {
        directory: String,
        expected: usize,
        found: usize,
    },
    #[error("line {line} is not valid UTF-8")]
    InvalidEncoding { line: u64 },
    #[error("malformed file entry at line {line}: {reason}")]
    MalformedFileEntry { line: u64, reason: String },
    #[error("unknown drift category code {code:?} at line {line}")]
    UnknownCategory { line: u64, code: String },
    #[error("invalid header {field}: {reason}")]
    InvalidHeader {
        field: &'static str,
        reason: &'static str,
    },
    #[error("invalid path {path:?}: {reason}")]
    InvalidPath { path: String, reason: &'static str },
    #[error("invalid digest {digest:?} for {file}")]
    InvalidDigest { file: String, digest: String },
}

impl ChangeSetError {
    /// True when the error describes file content rather than stream I/O
    pub fn is_corruption(&self) -> bool {
        !matches!(self, ChangeSetError::Io(_))
    }
}
