// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift categories and their single-character wire codes
//!
//! The codes are an external contract: change-set files written by earlier
//! agents must keep decoding to the same categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// An unrecognized file category code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown drift category code: {0:?}")]
pub struct UnknownCategory(pub String);

/// An unrecognized change-set category code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown change set category code: {0:?}")]
pub struct UnknownChangeSetCategory(pub String);

/// What happened to a single tracked file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftCategory {
    FileAdded,
    FileChanged,
    FileRemoved,
}

impl DriftCategory {
    pub fn code(self) -> &'static str {
        match self {
            DriftCategory::FileAdded => "A",
            DriftCategory::FileChanged => "C",
            DriftCategory::FileRemoved => "R",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownCategory> {
        match code {
            "A" => Ok(DriftCategory::FileAdded),
            "C" => Ok(DriftCategory::FileChanged),
            "R" => Ok(DriftCategory::FileRemoved),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

impl fmt::Display for DriftCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DriftCategory::FileAdded => "FILE_ADDED",
            DriftCategory::FileChanged => "FILE_CHANGED",
            DriftCategory::FileRemoved => "FILE_REMOVED",
        };
        f.write_str(name)
    }
}

impl FromStr for DriftCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
    }
}

/// Whether a change set is a full baseline or a delta against the previous one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftChangeSetCategory {
    /// Every tracked file, listed as added relative to nothing
    Coverage,
    /// Only the files that changed since the previous change set
    Drift,
}

impl DriftChangeSetCategory {
    pub fn code(self) -> &'static str {
        match self {
            DriftChangeSetCategory::Coverage => "C",
            DriftChangeSetCategory::Drift => "D",
        }
    }

    pub fn from_code(code: &str) -> Result<Self, UnknownChangeSetCategory> {
        match code {
            "C" => Ok(DriftChangeSetCategory::Coverage),
            "D" => Ok(DriftChangeSetCategory::Drift),
            other => Err(UnknownChangeSetCategory(other.to_string())),
        }
    }
}

impl fmt::Display for DriftChangeSetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftChangeSetCategory::Coverage => f.write_str("COVERAGE"),
            DriftChangeSetCategory::Drift => f.write_str("DRIFT"),
        }
    }
}

/// How detected drift for a definition is treated downstream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriftHandlingMode {
    /// Drift is unexpected and should raise alerts
    #[default]
    Normal,
    /// Drift is expected (e.g. a maintenance window); record it quietly
    PlannedChanges,
}

impl DriftHandlingMode {
    pub fn should_alert(self) -> bool {
        matches!(self, DriftHandlingMode::Normal)
    }
}

impl fmt::Display for DriftHandlingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriftHandlingMode::Normal => f.write_str("normal"),
            DriftHandlingMode::PlannedChanges => f.write_str("planned_changes"),
        }
    }
}

#[cfg(test)]
#[path = "category_tests.rs"]
mod tests;
