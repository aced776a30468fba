// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drift diff` - Compare two tracked states

use crate::output::{self, OutputFormat};
use anyhow::{bail, Context, Result};
use clap::Args;
use drift_core::{compare_entries, ChangeSetStore, Snapshot};
use std::path::{Path, PathBuf};

#[derive(Args)]
pub struct DiffArgs {
    /// Old state: a coverage change-set file or a store directory
    pub old: PathBuf,
    /// New state: a coverage change-set file or a store directory
    pub new: PathBuf,
}

pub fn diff(args: DiffArgs, format: OutputFormat) -> Result<()> {
    let old = load_snapshot(&args.old)?;
    let new = load_snapshot(&args.new)?;

    output::print_list(&compare_entries(&old, &new), format)
}

fn load_snapshot(path: &Path) -> Result<Snapshot> {
    if path.is_dir() {
        let store = ChangeSetStore::open(path)?;
        store
            .snapshot()
            .with_context(|| format!("failed to replay store {}", path.display()))
    } else if path.is_file() {
        Snapshot::replay(&[path])
            .with_context(|| format!("failed to replay change set {}", path.display()))
    } else {
        bail!("{} does not exist", path.display())
    }
}
