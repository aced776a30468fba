// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drift purge` - Delete every change set in a store

use crate::output::{self, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Args;
use drift_core::ChangeSetStore;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct PurgeArgs {
    /// Directory holding the definition's change sets
    #[arg(long)]
    pub store: PathBuf,
}

#[derive(Serialize)]
struct PurgeReport {
    removed: usize,
}

impl fmt::Display for PurgeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "purged {} change sets", self.removed)
    }
}

pub fn purge(args: PurgeArgs, format: OutputFormat) -> Result<()> {
    if !args.store.is_dir() {
        bail!("store {} does not exist", args.store.display());
    }
    let store = ChangeSetStore::open(&args.store)
        .with_context(|| format!("failed to open store {}", args.store.display()))?;
    let removed = store
        .purge()
        .with_context(|| format!("failed to purge store {}", args.store.display()))?;

    output::print(&PurgeReport { removed }, format)
}
