// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Directory entries and the file entries they group
//!
//! A [`FileEntry`] is one tracked file's content-identity transition. The
//! category is the variant itself, so an entry can never disagree with its
//! own digests. The `"0"` sentinel only exists at the wire boundary.

use crate::category::DriftCategory;
use serde::{Deserialize, Serialize};

/// Digest written in place of a missing old or new content identity
pub const NO_DIGEST: &str = "0";

/// One tracked file's identity transition within a directory
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum FileEntry {
    Added {
        file: String,
        new_sha: String,
    },
    Changed {
        file: String,
        old_sha: String,
        new_sha: String,
    },
    Removed {
        file: String,
        old_sha: String,
    },
}

impl FileEntry {
    pub fn added_file_entry(file: impl Into<String>, new_sha: impl Into<String>) -> Self {
        FileEntry::Added {
            file: file.into(),
            new_sha: new_sha.into(),
        }
    }

    pub fn changed_file_entry(
        file: impl Into<String>,
        old_sha: impl Into<String>,
        new_sha: impl Into<String>,
    ) -> Self {
        FileEntry::Changed {
            file: file.into(),
            old_sha: old_sha.into(),
            new_sha: new_sha.into(),
        }
    }

    pub fn removed_file_entry(file: impl Into<String>, old_sha: impl Into<String>) -> Self {
        FileEntry::Removed {
            file: file.into(),
            old_sha: old_sha.into(),
        }
    }

    /// Build an entry from its decoded wire fields
    ///
    /// The category is taken from the explicit code and never re-derived
    /// from the digests. The sentinel must sit exactly on the absent side:
    /// an added entry carries it as the old digest, a removed entry as the
    /// new digest, and a changed entry on neither. Anything else is refused
    /// with the reason, so no positional digest is ever dropped.
    pub fn from_parts(
        category: DriftCategory,
        file: String,
        old_sha: String,
        new_sha: String,
    ) -> Result<Self, &'static str> {
        let old_absent = old_sha == NO_DIGEST;
        let new_absent = new_sha == NO_DIGEST;
        match category {
            DriftCategory::FileAdded => match (old_absent, new_absent) {
                (true, false) => Ok(FileEntry::Added { file, new_sha }),
                (false, _) => Err("added file must have old digest 0"),
                (true, true) => Err("added file has no new digest"),
            },
            DriftCategory::FileChanged => match (old_absent, new_absent) {
                (false, false) => Ok(FileEntry::Changed {
                    file,
                    old_sha,
                    new_sha,
                }),
                _ => Err("changed file must have both digests"),
            },
            DriftCategory::FileRemoved => match (old_absent, new_absent) {
                (false, true) => Ok(FileEntry::Removed { file, old_sha }),
                (_, false) => Err("removed file must have new digest 0"),
                (true, true) => Err("removed file has no old digest"),
            },
        }
    }

    /// Path relative to the owning directory entry
    pub fn file(&self) -> &str {
        match self {
            FileEntry::Added { file, .. }
            | FileEntry::Changed { file, .. }
            | FileEntry::Removed { file, .. } => file,
        }
    }

    pub fn category(&self) -> DriftCategory {
        match self {
            FileEntry::Added { .. } => DriftCategory::FileAdded,
            FileEntry::Changed { .. } => DriftCategory::FileChanged,
            FileEntry::Removed { .. } => DriftCategory::FileRemoved,
        }
    }

    /// Digest before the change, or [`NO_DIGEST`] for an added file
    pub fn old_sha(&self) -> &str {
        match self {
            FileEntry::Added { .. } => NO_DIGEST,
            FileEntry::Changed { old_sha, .. } | FileEntry::Removed { old_sha, .. } => old_sha,
        }
    }

    /// Digest after the change, or [`NO_DIGEST`] for a removed file
    pub fn new_sha(&self) -> &str {
        match self {
            FileEntry::Added { new_sha, .. } | FileEntry::Changed { new_sha, .. } => new_sha,
            FileEntry::Removed { .. } => NO_DIGEST,
        }
    }

    /// The digest that identifies the file for reporting
    ///
    /// New content for added and changed files, last known content for
    /// removed ones.
    pub fn current_sha(&self) -> &str {
        match self {
            FileEntry::Added { new_sha, .. } | FileEntry::Changed { new_sha, .. } => new_sha,
            FileEntry::Removed { old_sha, .. } => old_sha,
        }
    }
}

/// A directory and the ordered file entries recorded for it
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryEntry {
    directory: String,
    files: Vec<FileEntry>,
}

impl DirectoryEntry {
    pub fn new(directory: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            files: Vec::new(),
        }
    }

    /// Append a file entry, keeping insertion order
    pub fn add(mut self, entry: FileEntry) -> Self {
        self.files.push(entry);
        self
    }

    pub fn push(&mut self, entry: FileEntry) {
        self.files.push(entry);
    }

    pub fn directory(&self) -> &str {
        &self.directory
    }

    pub fn files(&self) -> &[FileEntry] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn into_files(self) -> Vec<FileEntry> {
        self.files
    }
}

impl Extend<FileEntry> for DirectoryEntry {
    fn extend<I: IntoIterator<Item = FileEntry>>(&mut self, iter: I) {
        self.files.extend(iter);
    }
}

#[cfg(test)]
#[path = "entry_tests.rs"]
mod tests;
