// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory of published change sets
//!
//! Each change set lives in its own file named by version. Files are
//! written to a temporary name, synced, then renamed into place, so a
//! reader never sees a partial change set.

use super::snapshot::{ReplayError, Snapshot};
use crate::changeset::{
    read_change_set, ChangeSetError, ChangeSetReader, ChangeSetWriter, DirectoryEntry, Headers,
    ParseMode,
};
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

const FILE_PREFIX: &str = "changeset-";
const FILE_SUFFIX: &str = ".txt";

/// Errors from change-set store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("change set error: {0}")]
    ChangeSet(#[from] ChangeSetError),
    #[error("replay error: {0}")]
    Replay(#[from] ReplayError),
    #[error("change set version {0} already exists")]
    VersionExists(u32),
    #[error("change set version {0} not found")]
    NotFound(u32),
}

/// Published change sets for one drift definition
#[derive(Debug, Clone)]
pub struct ChangeSetStore {
    dir: PathBuf,
}

impl ChangeSetStore {
    /// Open or create a store at the given directory
    pub fn open(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, version: u32) -> PathBuf {
        self.dir
            .join(format!("{}{:08}{}", FILE_PREFIX, version, FILE_SUFFIX))
    }

    /// Stored versions, oldest first
    pub fn versions(&self) -> Result<Vec<u32>, StoreError> {
        let mut versions = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            if let Some(version) = parse_file_name(name) {
                versions.push(version);
            }
        }
        versions.sort_unstable();
        Ok(versions)
    }

    pub fn latest_version(&self) -> Result<Option<u32>, StoreError> {
        Ok(self.versions()?.last().copied())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.versions()?.is_empty())
    }

    /// Read the headers of a stored change set
    pub fn headers(&self, version: u32) -> Result<Headers, StoreError> {
        let path = self.existing_path(version)?;
        let reader = ChangeSetReader::open(&path)?;
        Ok(reader.headers().clone())
    }

    /// Read a stored change set in full
    pub fn read(&self, version: u32) -> Result<(Headers, Vec<DirectoryEntry>), StoreError> {
        let path = self.existing_path(version)?;
        Ok(read_change_set(&path, ParseMode::Strict)?)
    }

    /// Write a change set under the version in its headers
    ///
    /// Returns the path of the published file.
    pub fn publish(
        &self,
        headers: &Headers,
        entries: &[DirectoryEntry],
    ) -> Result<PathBuf, StoreError> {
        let path = self.path_for(headers.version);
        if path.exists() {
            return Err(StoreError::VersionExists(headers.version));
        }

        let mut temp = NamedTempFile::new_in(&self.dir)?;
        let mut writer = ChangeSetWriter::new(BufWriter::new(temp.as_file_mut()), headers)?;
        for entry in entries {
            writer.write_directory_entry(entry)?;
        }
        let (groups, files) = (writer.groups_written(), writer.files_written());
        writer.close()?;
        temp.as_file().sync_all()?;

        temp.persist_noclobber(&path).map_err(|e| {
            if e.error.kind() == io::ErrorKind::AlreadyExists {
                StoreError::VersionExists(headers.version)
            } else {
                StoreError::Io(e.error)
            }
        })?;

        tracing::info!(
            path = %path.display(),
            version = headers.version,
            category = %headers.category,
            groups,
            files,
            "published change set"
        );
        Ok(path)
    }

    /// Replay the stored change sets from the latest coverage set onward
    pub fn snapshot(&self) -> Result<Snapshot, StoreError> {
        let versions = self.versions()?;
        self.replay(&versions)
    }

    /// Tracked state as it was once `version` was published
    ///
    /// Replays from the last coverage set at or before `version`; later
    /// change sets are ignored.
    pub fn snapshot_at(&self, version: u32) -> Result<Snapshot, StoreError> {
        let versions = self.versions()?;
        let end = versions
            .binary_search(&version)
            .map_err(|_| StoreError::NotFound(version))?;
        self.replay(&versions[..=end])
    }

    /// Delete every stored change set
    ///
    /// Returns how many were removed. The store directory is kept and can be
    /// published to again, starting with a new coverage set.
    pub fn purge(&self) -> Result<usize, StoreError> {
        let versions = self.versions()?;
        // Newest first, so an interrupted purge leaves a replayable prefix
        for version in versions.iter().rev() {
            match fs::remove_file(self.path_for(*version)) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }
        tracing::info!(
            dir = %self.dir.display(),
            removed = versions.len(),
            "purged change sets"
        );
        Ok(versions.len())
    }

    fn replay(&self, versions: &[u32]) -> Result<Snapshot, StoreError> {
        let mut start = 0;
        for (index, version) in versions.iter().enumerate().rev() {
            if self.headers(*version)?.is_coverage() {
                start = index;
                break;
            }
        }

        let paths: Vec<PathBuf> = versions[start..]
            .iter()
            .map(|version| self.path_for(*version))
            .collect();
        Ok(Snapshot::replay(&paths)?)
    }

    fn existing_path(&self, version: u32) -> Result<PathBuf, StoreError> {
        let path = self.path_for(version);
        if path.exists() {
            Ok(path)
        } else {
            Err(StoreError::NotFound(version))
        }
    }
}

fn parse_file_name(name: &str) -> Option<u32> {
    let digits = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
