// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! drift - change-set inspection and drift detection CLI

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{detect, diff, purge, show, validate};
use output::OutputFormat;
use std::process::ExitCode;

/// Environment variable holding the log filter
const LOG_ENV: &str = "DRIFT_LOG";

#[derive(Parser)]
#[command(
    name = "drift",
    version,
    about = "Drift change sets - detect, inspect and compare tracked file state"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan a definition's basedir and publish coverage or drift
    Detect(detect::DetectArgs),
    /// Print a change-set file
    Show(show::ShowArgs),
    /// Compare two tracked states
    Diff(diff::DiffArgs),
    /// Strictly read a change-set file
    Validate(validate::ValidateArgs),
    /// Delete every change set in a store
    Purge(purge::PurgeArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Detect(args) => detect::detect(args, cli.format),
        Commands::Show(args) => show::show(args, cli.format),
        Commands::Diff(args) => diff::diff(args, cli.format),
        Commands::Validate(args) => validate::validate(args, cli.format),
        Commands::Purge(args) => purge::purge(args, cli.format),
    }
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
