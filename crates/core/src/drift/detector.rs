// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Drift detection for one definition
//!
//! The first run records a coverage change set of everything tracked.
//! Later runs compare a fresh scan against the replayed store and publish
//! a drift change set only when something differs.
//!
//! A pinned definition still stores the delta from the latest version, so the
//! store stays replayable, but reports drift against the pinned version.

use super::compare::{compare, compare_entries};
use super::record::DriftChangeSetSummary;
use super::scan::{scan, ScanError, ScanReport};
use super::snapshot::Snapshot;
use super::store::{ChangeSetStore, StoreError};
use crate::category::DriftChangeSetCategory;
use crate::clock::{Clock, SystemClock};
use crate::config::DriftDefinition;
use thiserror::Error;

/// Errors from a detection run
#[derive(Debug, Error)]
pub enum DetectError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),
    #[error("scan error: {0}")]
    Scan(#[from] ScanError),
}

/// Runs detection for a definition against its change-set store
pub struct DriftDetector<C: Clock = SystemClock> {
    definition: DriftDefinition,
    store: ChangeSetStore,
    clock: C,
}

impl DriftDetector<SystemClock> {
    pub fn new(definition: DriftDefinition, store: ChangeSetStore) -> Self {
        Self::with_clock(definition, store, SystemClock)
    }
}

impl<C: Clock> DriftDetector<C> {
    pub fn with_clock(definition: DriftDefinition, store: ChangeSetStore, clock: C) -> Self {
        Self {
            definition,
            store,
            clock,
        }
    }

    pub fn definition(&self) -> &DriftDefinition {
        &self.definition
    }

    pub fn store(&self) -> &ChangeSetStore {
        &self.store
    }

    /// Scan, compare and publish
    ///
    /// Returns the summary of the published change set, or `None` when the
    /// tracked files match the latest stored version.
    pub fn detect(&self) -> Result<Option<DriftChangeSetSummary>, DetectError> {
        let Some(latest) = self.store.latest_version()? else {
            return self.publish_coverage().map(Some);
        };

        let previous = self.store.snapshot()?;
        let pinned = match self.definition.pinned_version {
            Some(version) => Some(self.store.snapshot_at(version)?),
            None => None,
        };
        let report = self.scan()?;
        let entries = compare(&previous, &report.snapshot);
        if entries.is_empty() {
            tracing::debug!(definition = %self.definition.name, version = latest, "no drift");
            return Ok(None);
        }

        let headers = self
            .definition
            .headers(latest.saturating_add(1), DriftChangeSetCategory::Drift);
        self.store.publish(&headers, &entries)?;

        let baseline = pinned.as_ref().unwrap_or(&previous);
        let drift = compare_entries(baseline, &report.snapshot);
        let summary = DriftChangeSetSummary::new(
            &headers,
            self.definition.handling_mode,
            self.clock.now(),
            &drift,
        )
        .with_pinned_version(self.definition.pinned_version);
        if summary.should_alert() {
            tracing::warn!(
                definition = %summary.definition_name,
                version = summary.version,
                files = summary.drift_paths.len(),
                "drift detected"
            );
        } else {
            tracing::info!(
                definition = %summary.definition_name,
                version = summary.version,
                files = summary.drift_paths.len(),
                mode = %summary.handling_mode,
                "planned changes recorded"
            );
        }
        Ok(Some(summary))
    }

    fn publish_coverage(&self) -> Result<DriftChangeSetSummary, DetectError> {
        let report = self.scan()?;
        let headers = self.definition.headers(0, DriftChangeSetCategory::Coverage);
        self.store.publish(&headers, &report.snapshot.to_coverage())?;

        let tracked = compare_entries(&Snapshot::new(), &report.snapshot);
        tracing::info!(
            definition = %self.definition.name,
            files = tracked.len(),
            "recorded coverage"
        );
        Ok(DriftChangeSetSummary::new(
            &headers,
            self.definition.handling_mode,
            self.clock.now(),
            &tracked,
        ))
    }

    fn scan(&self) -> Result<ScanReport, DetectError> {
        let report = scan(&self.definition)?;
        if !report.skipped.is_empty() {
            tracing::warn!(
                definition = %self.definition.name,
                skipped = report.skipped.len(),
                "some files cannot be tracked"
            );
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "detector_tests.rs"]
mod tests;
