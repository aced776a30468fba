// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift records handed to storage and alerting

use crate::category::{DriftCategory, DriftChangeSetCategory, DriftHandlingMode};
use crate::changeset::{DirectoryEntry, FileEntry, Headers};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One observed drift occurrence
///
/// Built once all fields are known; there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriftChangeSetEntry {
    category: DriftCategory,
    path: String,
    digest: String,
    size: Option<u64>,
}

impl DriftChangeSetEntry {
    pub fn new(
        category: DriftCategory,
        path: impl Into<String>,
        digest: impl Into<String>,
        size: Option<u64>,
    ) -> Self {
        Self {
            category,
            path: path.into(),
            digest: digest.into(),
            size,
        }
    }

    /// Flatten a file entry into a record keyed by its full relative path
    pub fn from_file_entry(directory: &str, entry: &FileEntry, size: Option<u64>) -> Self {
        Self::new(
            entry.category(),
            join_path(directory, entry.file()),
            entry.current_sha(),
            size,
        )
    }

    pub fn category(&self) -> DriftCategory {
        self.category
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn digest(&self) -> &str {
        &self.digest
    }

    /// Size in bytes, known only when the record came from a filesystem scan
    pub fn size(&self) -> Option<u64> {
        self.size
    }
}

impl fmt::Display for DriftChangeSetEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.category.code(), self.path, self.digest)
    }
}

/// Every file of every directory entry, in stream order
pub fn flatten(entries: &[DirectoryEntry]) -> Vec<DriftChangeSetEntry> {
    entries
        .iter()
        .flat_map(|dir| {
            dir.files()
                .iter()
                .map(move |file| DriftChangeSetEntry::from_file_entry(dir.directory(), file, None))
        })
        .collect()
}

/// Join a directory key and a file name, treating `.` as the base directory
pub fn join_path(directory: &str, file: &str) -> String {
    if directory.is_empty() || directory == "." {
        file.to_string()
    } else if directory.ends_with('/') {
        format!("{}{}", directory, file)
    } else {
        format!("{}/{}", directory, file)
    }
}

/// Summary of one published change set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftChangeSetSummary {
    pub category: DriftChangeSetCategory,
    pub resource_id: u32,
    pub definition_name: String,
    pub version: u32,
    pub handling_mode: DriftHandlingMode,
    pub created_at: DateTime<Utc>,
    pub drift_paths: Vec<String>,
    /// Version the drift paths were measured against, when pinned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pinned_version: Option<u32>,
}

impl DriftChangeSetSummary {
    pub fn new(
        headers: &Headers,
        handling_mode: DriftHandlingMode,
        created_at: DateTime<Utc>,
        entries: &[DriftChangeSetEntry],
    ) -> Self {
        Self {
            category: headers.category,
            resource_id: headers.resource_id,
            definition_name: headers.definition_name.clone(),
            version: headers.version,
            handling_mode,
            created_at,
            drift_paths: entries.iter().map(|e| e.path().to_string()).collect(),
            pinned_version: None,
        }
    }

    pub fn with_pinned_version(mut self, version: Option<u32>) -> Self {
        self.pinned_version = version;
        self
    }

    /// Whether this change set should raise alerts downstream
    pub fn should_alert(&self) -> bool {
        self.category == DriftChangeSetCategory::Drift
            && !self.drift_paths.is_empty()
            && self.handling_mode.should_alert()
    }
}

impl fmt::Display for DriftChangeSetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} change set v{} for {} ({} files, {})",
            self.category,
            self.version,
            self.definition_name,
            self.drift_paths.len(),
            self.handling_mode
        )?;
        if let Some(pinned) = self.pinned_version {
            write!(f, " against pinned v{}", pinned)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
