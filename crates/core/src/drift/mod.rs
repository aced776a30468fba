// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift model built on change-set files
//!
//! ```text
//! basedir ──scan──→ Snapshot ──compare──→ DirectoryEntry groups
//!                      ↑                          ↓
//!            ChangeSetStore::snapshot    ChangeSetStore::publish
//! ```

pub mod compare;
pub mod detector;
pub mod record;
pub mod scan;
pub mod snapshot;
pub mod store;

pub use compare::{compare, compare_entries};
pub use detector::{DetectError, DriftDetector};
pub use record::{flatten, join_path, DriftChangeSetEntry, DriftChangeSetSummary};
pub use scan::{scan, ScanError, ScanReport, BASE_DIRECTORY};
pub use snapshot::{ReplayError, Snapshot, TrackedFile};
pub use store::{ChangeSetStore, StoreError};
