// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Materialized tracked state from change-set replay
//!
//! A Snapshot is the set of files a drift definition tracks, rebuilt by
//! replaying a coverage change set followed by the drift change sets
//! published after it.

use crate::changeset::{ChangeSetError, ChangeSetReader, DirectoryEntry, FileEntry};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from replaying change sets into a snapshot
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: ChangeSetError,
    },
    #[error("{path} is a drift change set but no coverage change set precedes it")]
    MissingCoverage { path: PathBuf },
    #[error("{path} has version {found}, expected {expected}")]
    VersionGap {
        path: PathBuf,
        expected: u32,
        found: u32,
    },
}

/// Digest and size of one tracked file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackedFile {
    pub digest: String,
    /// Unknown when the file was rebuilt from a change set
    pub size: Option<u64>,
}

impl TrackedFile {
    pub fn new(digest: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            digest: digest.into(),
            size,
        }
    }
}

/// Tracked files keyed by directory, then file name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    directories: BTreeMap<String, BTreeMap<String, TrackedFile>>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay change-set files in order
    ///
    /// The first file must be a coverage change set. A later coverage
    /// change set resets the state; each drift change set must carry the
    /// version after the one before it.
    pub fn replay<P: AsRef<Path>>(paths: &[P]) -> Result<Self, ReplayError> {
        let mut snapshot = Snapshot::new();
        let mut last_version: Option<u32> = None;

        for path in paths {
            let path = path.as_ref();
            let read_err = |source| ReplayError::Read {
                path: path.to_path_buf(),
                source,
            };

            let mut reader = ChangeSetReader::open(path).map_err(read_err)?;
            let headers = reader.headers().clone();

            if headers.is_coverage() {
                snapshot.clear();
            } else {
                let Some(previous) = last_version else {
                    return Err(ReplayError::MissingCoverage {
                        path: path.to_path_buf(),
                    });
                };
                let expected = previous.saturating_add(1);
                if headers.version != expected {
                    return Err(ReplayError::VersionGap {
                        path: path.to_path_buf(),
                        expected,
                        found: headers.version,
                    });
                }
            }

            while let Some(entry) = reader.read_directory_entry().map_err(read_err)? {
                snapshot.apply(&entry);
            }
            tracing::debug!(
                path = %path.display(),
                version = headers.version,
                category = %headers.category,
                files = snapshot.file_count(),
                "replayed change set"
            );
            last_version = Some(headers.version);
        }

        Ok(snapshot)
    }

    /// Apply one directory group
    pub fn apply(&mut self, entry: &DirectoryEntry) {
        let directory = entry.directory();
        for file in entry.files() {
            match file {
                FileEntry::Added { file, new_sha } | FileEntry::Changed { file, new_sha, .. } => {
                    self.insert(directory, file, TrackedFile::new(new_sha.as_str(), None));
                }
                FileEntry::Removed { file, .. } => {
                    if self.remove(directory, file).is_none() {
                        tracing::debug!(directory, file = %file, "removed file was not tracked");
                    }
                }
            }
        }
    }

    pub fn insert(&mut self, directory: &str, file: &str, tracked: TrackedFile) {
        self.directories
            .entry(directory.to_string())
            .or_default()
            .insert(file.to_string(), tracked);
    }

    /// Remove a file, dropping its directory once empty
    pub fn remove(&mut self, directory: &str, file: &str) -> Option<TrackedFile> {
        let files = self.directories.get_mut(directory)?;
        let removed = files.remove(file);
        if files.is_empty() {
            self.directories.remove(directory);
        }
        removed
    }

    pub fn get(&self, directory: &str, file: &str) -> Option<&TrackedFile> {
        self.directories.get(directory)?.get(file)
    }

    pub fn files(&self, directory: &str) -> Option<&BTreeMap<String, TrackedFile>> {
        self.directories.get(directory)
    }

    /// Directory keys in sorted order
    pub fn directories(&self) -> impl Iterator<Item = &str> {
        self.directories.keys().map(String::as_str)
    }

    /// Every tracked file as `(directory, file, tracked)`, sorted
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &TrackedFile)> {
        self.directories.iter().flat_map(|(dir, files)| {
            files
                .iter()
                .map(move |(file, tracked)| (dir.as_str(), file.as_str(), tracked))
        })
    }

    pub fn file_count(&self) -> usize {
        self.directories.values().map(BTreeMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }

    pub fn clear(&mut self) {
        self.directories.clear();
    }

    /// The whole snapshot as a coverage body: every file Added
    pub fn to_coverage(&self) -> Vec<DirectoryEntry> {
        self.directories
            .iter()
            .map(|(dir, files)| {
                let mut entry = DirectoryEntry::new(dir.as_str());
                entry.extend(
                    files
                        .iter()
                        .map(|(file, tracked)| FileEntry::added_file_entry(file, &tracked.digest)),
                );
                entry
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
