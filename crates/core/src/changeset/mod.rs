// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Change-set files
//!
//! A change set records the tracked state of a directory tree, either as a
//! full coverage snapshot or as a delta against the previous change set.
//!
//! ## Architecture
//!
//! ```text
//! DirectoryEntry → ChangeSetWriter → disk (changeset-NNNNNNNN.txt)
//!                                          ↓
//!                                ChangeSetReader → DirectoryEntry
//! ```
//!
//! ## Format guarantees
//!
//! - Header block first, parsed once when the reader opens
//! - Groups are read back in the order they were written
//! - File categories are carried as explicit codes, never re-derived
//! - Writes reject anything that would not parse back identically

pub mod entry;
pub mod error;
pub mod format;
pub mod headers;
pub mod reader;
pub mod writer;

pub use entry::{DirectoryEntry, FileEntry, NO_DIGEST};
pub use error::ChangeSetError;
pub use headers::Headers;
pub use reader::{read_change_set, ChangeSetReader, ParseMode};
pub use writer::{write_change_set, ChangeSetWriter};
