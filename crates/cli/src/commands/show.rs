// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `drift show` - Print a change-set file

use crate::output::{self, OutputFormat};
use anyhow::{Context, Result};
use clap::Args;
use drift_core::{flatten, ChangeSetReader, DirectoryEntry, Headers, ParseMode};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

#[derive(Args)]
pub struct ShowArgs {
    /// Change-set file
    pub file: PathBuf,
    /// Skip groups with a malformed header instead of failing
    #[arg(long)]
    pub lenient: bool,
}

#[derive(Serialize)]
struct ChangeSetView {
    headers: Headers,
    entries: Vec<DirectoryEntry>,
    skipped_groups: u64,
}

impl fmt::Display for ChangeSetView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.headers.to_block())?;
        for group in &self.entries {
            writeln!(f, "{} {}", group.directory(), group.len())?;
            for entry in flatten(std::slice::from_ref(group)) {
                writeln!(f, "  {}", entry)?;
            }
        }
        if self.skipped_groups > 0 {
            writeln!(f, "({} malformed groups skipped)", self.skipped_groups)?;
        }
        Ok(())
    }
}

pub fn show(args: ShowArgs, format: OutputFormat) -> Result<()> {
    let mode = if args.lenient {
        ParseMode::Lenient
    } else {
        ParseMode::Strict
    };
    let view = read_view(&args, mode)
        .with_context(|| format!("failed to read change set {}", args.file.display()))?;

    match format {
        // Display already ends with a newline
        OutputFormat::Text => {
            print!("{}", view);
            Ok(())
        }
        OutputFormat::Json => output::print(&view, format),
    }
}

fn read_view(args: &ShowArgs, mode: ParseMode) -> Result<ChangeSetView> {
    let mut reader = ChangeSetReader::open(&args.file)?.with_mode(mode);
    let mut entries = Vec::new();
    while let Some(entry) = reader.read_directory_entry()? {
        entries.push(entry);
    }
    Ok(ChangeSetView {
        headers: reader.headers().clone(),
        entries,
        skipped_groups: reader.groups_skipped(),
    })
}
