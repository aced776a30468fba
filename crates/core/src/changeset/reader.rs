// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-set reader
//!
//! Parses the header block once at open time, then yields one
//! [`DirectoryEntry`] per call. The sequence is lazy, finite and not
//! restartable: open a fresh reader to scan again.

use super::entry::DirectoryEntry;
use super::error::ChangeSetError;
use super::format::{parse_file_entry, parse_group_header, LineSource};
use super::headers::Headers;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// How the reader treats a group header it cannot parse
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParseMode {
    /// Return `MalformedGroupHeader` to the caller
    #[default]
    Strict,
    /// Log the line, skip to the next blank line, and continue with the
    /// following group
    Lenient,
}

/// Pull-based reader over the directory groups of one change set
pub struct ChangeSetReader<R> {
    lines: LineSource<R>,
    headers: Headers,
    mode: ParseMode,
    exhausted: bool,
    groups_read: u64,
    groups_skipped: u64,
}

impl ChangeSetReader<BufReader<File>> {
    /// Open a change-set file and parse its header block
    pub fn open(path: &Path) -> Result<Self, ChangeSetError> {
        Self::new(BufReader::new(File::open(path)?))
    }
}

impl<R: BufRead> ChangeSetReader<R> {
    /// Read from any buffered source that starts with a header block
    pub fn new(source: R) -> Result<Self, ChangeSetError> {
        let mut lines = LineSource::new(source);
        let headers = Headers::read_block(&mut lines)?;
        Ok(Self::from_parts(lines, headers))
    }

    /// Read a headerless stream, with headers supplied out of band
    ///
    /// For change-set files written before the header block existed.
    pub fn without_headers(source: R, headers: Headers) -> Self {
        Self::from_parts(LineSource::new(source), headers)
    }

    fn from_parts(lines: LineSource<R>, headers: Headers) -> Self {
        Self {
            lines,
            headers,
            mode: ParseMode::default(),
            exhausted: false,
            groups_read: 0,
            groups_skipped: 0,
        }
    }

    pub fn with_mode(mut self, mode: ParseMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Number of groups returned so far
    pub fn groups_read(&self) -> u64 {
        self.groups_read
    }

    /// Number of groups dropped in lenient mode
    pub fn groups_skipped(&self) -> u64 {
        self.groups_skipped
    }

    /// Read the next directory group
    ///
    /// Returns `Ok(None)` once the stream is exhausted, and keeps doing so
    /// on every later call.
    pub fn read_directory_entry(&mut self) -> Result<Option<DirectoryEntry>, ChangeSetError> {
        if self.exhausted {
            return Ok(None);
        }

        loop {
            let header = match self.next_non_blank() {
                Ok(Some(header)) => header,
                Ok(None) => {
                    self.exhausted = true;
                    return Ok(None);
                }
                Err(ChangeSetError::InvalidEncoding { line }) if self.mode == ParseMode::Lenient => {
                    tracing::warn!(line, "skipping directory entry with undecodable header");
                    self.groups_skipped += 1;
                    self.skip_group()?;
                    continue;
                }
                Err(e) => return Err(e),
            };
            let header_line = self.lines.line_number();

            let parsed = parse_group_header(&header).map(|(dir, count)| (dir.to_string(), count));
            let Some((directory, count)) = parsed else {
                match self.mode {
                    ParseMode::Strict => {
                        return Err(ChangeSetError::MalformedGroupHeader {
                            line: header_line,
                            content: header,
                        });
                    }
                    ParseMode::Lenient => {
                        tracing::warn!(
                            line = header_line,
                            content = %header,
                            "skipping directory entry with malformed header"
                        );
                        self.groups_skipped += 1;
                        self.skip_group()?;
                        continue;
                    }
                }
            };

            let entry = self.read_files(directory, count)?;
            self.groups_read += 1;
            tracing::debug!(
                directory = entry.directory(),
                files = entry.len(),
                "read directory entry"
            );
            return Ok(Some(entry));
        }
    }

    /// Release the underlying source
    pub fn close(self) -> R {
        self.lines.into_inner()
    }

    fn read_files(
        &mut self,
        directory: String,
        count: usize,
    ) -> Result<DirectoryEntry, ChangeSetError> {
        let mut entry = DirectoryEntry::new(directory);

        for found in 0..count {
            let line = match self.lines.next_line()? {
                Some(line) if !line.trim().is_empty() => line,
                other => {
                    if other.is_none() {
                        self.exhausted = true;
                    }
                    return Err(ChangeSetError::Truncated {
                        directory: entry.directory().to_string(),
                        expected: count,
                        found,
                    });
                }
            };
            entry.push(parse_file_entry(&line, self.lines.line_number())?);
        }

        // Separator is cosmetic: consume it when present, otherwise leave the
        // line for the next group header.
        if let Some(line) = self.lines.next_line()? {
            if !line.trim().is_empty() {
                self.lines.push_back(line);
            }
        }

        Ok(entry)
    }

    fn next_non_blank(&mut self) -> Result<Option<String>, ChangeSetError> {
        while let Some(line) = self.lines.next_line()? {
            if !line.trim().is_empty() {
                return Ok(Some(line));
            }
        }
        Ok(None)
    }

    /// Consume lines up to and including the next blank line
    fn skip_group(&mut self) -> Result<(), ChangeSetError> {
        loop {
            match self.lines.next_line() {
                Ok(Some(line)) if line.trim().is_empty() => return Ok(()),
                Ok(Some(_)) | Err(ChangeSetError::InvalidEncoding { .. }) => {}
                Ok(None) => return Ok(()),
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: BufRead> Iterator for ChangeSetReader<R> {
    type Item = Result<DirectoryEntry, ChangeSetError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_directory_entry().transpose()
    }
}

/// Read every directory entry of a change-set file
pub fn read_change_set(
    path: &Path,
    mode: ParseMode,
) -> Result<(Headers, Vec<DirectoryEntry>), ChangeSetError> {
    let mut reader = ChangeSetReader::open(path)?.with_mode(mode);
    let mut entries = Vec::new();
    while let Some(entry) = reader.read_directory_entry()? {
        entries.push(entry);
    }
    Ok((reader.headers().clone(), entries))
}

#[cfg(test)]
#[path = "reader_tests.rs"]
mod tests;
