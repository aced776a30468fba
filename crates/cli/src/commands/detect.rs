// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drift detect` - Scan a definition and publish any drift

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use drift_core::{ChangeSetStore, DriftChangeSetSummary, DriftDefinition, DriftDetector};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct DetectArgs {
    /// Drift definition (TOML)
    #[arg(long)]
    pub definition: PathBuf,
    /// Directory holding the definition's change sets
    #[arg(long)]
    pub store: PathBuf,
}

#[derive(Serialize)]
#[serde(transparent)]
struct DetectOutput(Option<DriftChangeSetSummary>);

impl fmt::Display for DetectOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(summary) = &self.0 else {
            return write!(f, "no drift detected");
        };
        write!(f, "{}", summary)?;
        for path in &summary.drift_paths {
            write!(f, "\n  {}", path)?;
        }
        Ok(())
    }
}

pub fn detect(args: DetectArgs, format: OutputFormat) -> Result<()> {
    let definition = DriftDefinition::load(&args.definition)
        .with_context(|| format!("failed to load definition {}", args.definition.display()))?;
    let store = ChangeSetStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store.display()))?;

    let summary = DriftDetector::new(definition, store)
        .detect()
        .context("drift detection failed")?;

    output::print(&DetectOutput(summary), format)
}
