// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drift validate` - Strictly read a change-set file

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use drift_core::{read_change_set, DriftChangeSetCategory, ParseMode};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct ValidateArgs {
    /// Change-set file
    pub file: PathBuf,
}

#[derive(Serialize)]
struct ValidationReport {
    category: DriftChangeSetCategory,
    version: u32,
    groups: usize,
    files: usize,
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ok: {} v{}, {} groups, {} files",
            self.category, self.version, self.groups, self.files
        )
    }
}

pub fn validate(args: ValidateArgs, format: OutputFormat) -> Result<()> {
    let (headers, entries) = read_change_set(&args.file, ParseMode::Strict)
        .with_context(|| format!("invalid change set {}", args.file.display()))?;

    let report = ValidationReport {
        category: headers.category,
        version: headers.version,
        groups: entries.len(),
        files: entries.iter().map(|e| e.len()).sum(),
    };
    output::print(&report, format)
}
