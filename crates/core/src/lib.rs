// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! drift-core: change-set files and drift detection
//!
//! This crate provides:
//! - The change-set file format with a streaming reader and writer
//! - Snapshot replay and comparison of tracked files
//! - Filesystem scanning for a drift definition
//! - A versioned change-set store and the drift detector on top of it

pub mod category;
pub mod changeset;
pub mod clock;
pub mod config;
pub mod digest;
pub mod drift;

// Re-exports
pub use category::{
    DriftCategory, DriftChangeSetCategory, DriftHandlingMode, UnknownCategory,
    UnknownChangeSetCategory,
};
pub use changeset::{
    read_change_set, write_change_set, ChangeSetError, ChangeSetReader, ChangeSetWriter,
    DirectoryEntry, FileEntry, Headers, ParseMode, NO_DIGEST,
};
pub use clock::{Clock, FakeClock, SystemClock};
pub use config::{ConfigError, DriftDefinition, PathFilter};
pub use drift::{
    compare, compare_entries, flatten, scan, ChangeSetStore, DetectError, DriftChangeSetEntry,
    DriftChangeSetSummary, DriftDetector, ReplayError, ScanError, ScanReport, Snapshot,
    StoreError, TrackedFile,
};
