// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// docscan — flatten photographed documents from the command line.
//
// Entry point. Initialises logging, loads the configuration, and dispatches
// the requested command.

mod cli;
mod services;

use std::process::ExitCode;

use clap::Parser;
use docscan_core::human_errors::humanize_error;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use services::app_services::{AppServices, CommandError};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("docscan starting");

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let svc = AppServices::init(cli.config)?;
    tracing::debug!(
        config = %svc.config_path().display(),
        output_side = svc.config().scan.output_side,
        "Configuration loaded"
    );

    match cli.command {
        Command::Scan(args) => {
            let output = args.output_path();
            svc.scan_file(&args.input, &output)?;
            eprintln!("Saved: {}", output.display());
        }
        Command::Assemble(args) => {
            svc.assemble(&args.inputs, &args.output)?;
            eprintln!("Saved {} pages: {}", args.inputs.len(), args.output.display());
        }
        Command::Config { write } => {
            println!("{}", svc.config_json()?);
            if write {
                svc.save_config()?;
                eprintln!("Written: {}", svc.config_path().display());
            }
        }
    }
    Ok(())
}

fn report(err: &CommandError) {
    let human = humanize_error(&err.error);
    match &err.input {
        Some(input) => eprintln!("error: {}: {}", input.display(), human.message),
        None => eprintln!("error: {}", human.message),
    }
    eprintln!("  {}", human.suggestion);
    tracing::debug!(error = %err.error, "Command failed");
}
