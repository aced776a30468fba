// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot comparison

use super::record::DriftChangeSetEntry;
use super::snapshot::{Snapshot, TrackedFile};
use crate::changeset::{DirectoryEntry, FileEntry};
use std::collections::{BTreeMap, BTreeSet};

/// Directory groups that turn `old` into `new`
///
/// Directories come out sorted, files sorted within each directory.
/// Directories without differences are omitted.
pub fn compare(old: &Snapshot, new: &Snapshot) -> Vec<DirectoryEntry> {
    diff_directories(old, new)
        .into_iter()
        .map(|(directory, files)| {
            let mut entry = DirectoryEntry::new(directory);
            entry.extend(files.into_iter().map(|(entry, _)| entry));
            entry
        })
        .collect()
}

/// Flat drift records for `old` to `new`, carrying sizes where the
/// snapshots know them
pub fn compare_entries(old: &Snapshot, new: &Snapshot) -> Vec<DriftChangeSetEntry> {
    diff_directories(old, new)
        .into_iter()
        .flat_map(|(directory, files)| {
            files.into_iter().map(move |(entry, size)| {
                DriftChangeSetEntry::from_file_entry(&directory, &entry, size)
            })
        })
        .collect()
}

type DirectoryDiff = Vec<(String, Vec<(FileEntry, Option<u64>)>)>;

fn diff_directories(old: &Snapshot, new: &Snapshot) -> DirectoryDiff {
    let directories: BTreeSet<&str> = old.directories().chain(new.directories()).collect();
    let empty = BTreeMap::new();

    directories
        .into_iter()
        .filter_map(|directory| {
            let before = old.files(directory).unwrap_or(&empty);
            let after = new.files(directory).unwrap_or(&empty);
            let files = diff_files(before, after);
            if files.is_empty() {
                None
            } else {
                Some((directory.to_string(), files))
            }
        })
        .collect()
}

fn diff_files(
    before: &BTreeMap<String, TrackedFile>,
    after: &BTreeMap<String, TrackedFile>,
) -> Vec<(FileEntry, Option<u64>)> {
    let names: BTreeSet<&String> = before.keys().chain(after.keys()).collect();

    names
        .into_iter()
        .filter_map(|name| match (before.get(name), after.get(name)) {
            (None, Some(new)) => Some((
                FileEntry::added_file_entry(name.as_str(), new.digest.as_str()),
                new.size,
            )),
            (Some(old), None) => Some((
                FileEntry::removed_file_entry(name.as_str(), old.digest.as_str()),
                old.size,
            )),
            (Some(old), Some(new)) if old.digest != new.digest => Some((
                FileEntry::changed_file_entry(
                    name.as_str(),
                    old.digest.as_str(),
                    new.digest.as_str(),
                ),
                new.size,
            )),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
#[path = "compare_tests.rs"]
mod tests;
