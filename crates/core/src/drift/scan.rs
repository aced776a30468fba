// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem scan of a drift definition's base directory

use super::snapshot::{Snapshot, TrackedFile};
use crate::changeset::format::validate_directory;
use crate::config::{ConfigError, DriftDefinition};
use crate::digest::fingerprint_file;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Directory key for files directly in the base directory
pub const BASE_DIRECTORY: &str = ".";

/// Errors from scanning a base directory
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("basedir {0} is not a directory")]
    MissingBasedir(PathBuf),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to hash {path}: {source}")]
    Hash {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a scan
#[derive(Debug, Clone, Default)]
pub struct ScanReport {
    pub snapshot: Snapshot,
    /// Regular files visited, whether or not the filter tracked them
    pub visited: usize,
    /// Relative paths that cannot be written to a change set
    pub skipped: Vec<String>,
}

/// Walk the definition's basedir and hash every tracked file
///
/// Symlinks are not followed. Files vanishing mid-scan are left out.
pub fn scan(definition: &DriftDefinition) -> Result<ScanReport, ScanError> {
    let basedir = definition.basedir.as_path();
    if !basedir.is_dir() {
        return Err(ScanError::MissingBasedir(basedir.to_path_buf()));
    }
    let filter = definition.filter()?;
    let mut report = ScanReport::default();

    for entry in WalkDir::new(basedir).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        report.visited += 1;

        let path = entry.path();
        let Some((directory, file)) = split_relative(basedir, path) else {
            tracing::warn!(path = %path.display(), "skipping path that is not valid UTF-8");
            report.skipped.push(path.to_string_lossy().into_owned());
            continue;
        };
        let relative = if directory == BASE_DIRECTORY {
            file.clone()
        } else {
            format!("{}/{}", directory, file)
        };

        if !filter.matches(&relative) {
            continue;
        }
        if file.chars().any(char::is_whitespace) || validate_directory(&directory).is_err() {
            tracing::warn!(path = %relative, "skipping path that a change set cannot represent");
            report.skipped.push(relative);
            continue;
        }

        let (digest, size) = match fingerprint_file(path) {
            Ok(found) => found,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %relative, "file vanished during scan");
                continue;
            }
            Err(source) => {
                return Err(ScanError::Hash {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        report
            .snapshot
            .insert(&directory, &file, TrackedFile::new(digest, Some(size)));
    }

    tracing::debug!(
        basedir = %basedir.display(),
        visited = report.visited,
        tracked = report.snapshot.file_count(),
        skipped = report.skipped.len(),
        "scan complete"
    );
    Ok(report)
}

/// Split a path under basedir into its directory key and file name
fn split_relative(basedir: &Path, path: &Path) -> Option<(String, String)> {
    let relative = path.strip_prefix(basedir).ok()?;
    let mut parts = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_str()),
            _ => None,
        })
        .collect::<Option<Vec<_>>>()?;

    let file = parts.pop()?.to_string();
    let directory = if parts.is_empty() {
        BASE_DIRECTORY.to_string()
    } else {
        parts.join("/")
    };
    Some((directory, file))
}

#[cfg(test)]
#[path = "scan_tests.rs"]
mod tests;
