// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-set writer
//!
//! Emits the header block on construction, then one group per
//! [`DirectoryEntry`] in call order. Output is only guaranteed to be
//! visible after [`ChangeSetWriter::close`].

use super::entry::DirectoryEntry;
use super::error::ChangeSetError;
use super::format::{
    encode_file_entry, encode_group_header, validate_directory, validate_file_entry,
};
use super::headers::Headers;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Sequential writer for one change set
pub struct ChangeSetWriter<W: Write> {
    out: W,
    headers: Headers,
    groups_written: u64,
    files_written: u64,
    bytes_written: u64,
}

impl ChangeSetWriter<BufWriter<File>> {
    /// Create (or truncate) a change-set file
    pub fn create(path: &Path, headers: &Headers) -> Result<Self, ChangeSetError> {
        headers.validate()?;
        Self::new(BufWriter::new(File::create(path)?), headers)
    }
}

impl<W: Write> ChangeSetWriter<W> {
    /// Start a change set on any writer, emitting the header block
    pub fn new(out: W, headers: &Headers) -> Result<Self, ChangeSetError> {
        headers.validate()?;
        let mut writer = Self {
            out,
            headers: headers.clone(),
            groups_written: 0,
            files_written: 0,
            bytes_written: 0,
        };
        let block = headers.to_block();
        writer.write_raw(&block)?;
        Ok(writer)
    }

    /// Append one directory group
    ///
    /// The whole group is validated before any of it is written, so a
    /// rejected entry leaves the output untouched.
    pub fn write_directory_entry(&mut self, entry: &DirectoryEntry) -> Result<(), ChangeSetError> {
        validate_directory(entry.directory())?;
        for file in entry.files() {
            validate_file_entry(file)?;
        }

        let mut group = encode_group_header(entry.directory(), entry.len());
        group.push('\n');
        for file in entry.files() {
            group.push_str(&encode_file_entry(file));
            group.push('\n');
        }
        group.push('\n');

        self.write_raw(&group)?;
        self.groups_written += 1;
        self.files_written += entry.len() as u64;
        tracing::debug!(
            directory = entry.directory(),
            files = entry.len(),
            "wrote directory entry"
        );
        Ok(())
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn groups_written(&self) -> u64 {
        self.groups_written
    }

    pub fn files_written(&self) -> u64 {
        self.files_written
    }

    /// Bytes emitted so far, header block included
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Flush buffered output and hand back the underlying writer
    pub fn close(mut self) -> Result<W, ChangeSetError> {
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_raw(&mut self, text: &str) -> Result<(), ChangeSetError> {
        self.out.write_all(text.as_bytes())?;
        self.bytes_written += text.len() as u64;
        Ok(())
    }
}

/// Write a complete change set to `path` and sync it to disk
pub fn write_change_set(
    path: &Path,
    headers: &Headers,
    entries: &[DirectoryEntry],
) -> Result<u64, ChangeSetError> {
    let mut writer = ChangeSetWriter::create(path, headers)?;
    for entry in entries {
        writer.write_directory_entry(entry)?;
    }
    let bytes = writer.bytes_written();
    let file = writer
        .close()?
        .into_inner()
        .map_err(|e| ChangeSetError::Io(e.into_error()))?;
    file.sync_all()?;
    Ok(bytes)
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
