//! Folio CLI Binary
//!
//! Command-line interface for the folder/leaf namespace.

use anyhow::Context;
use clap::Parser;
use folio::logging::init_logging;
use folio::tooling::cli::{Cli, CliContext};
use std::io::Read;
use std::process;

fn read_listing(cli: &Cli) -> anyhow::Result<String> {
    if cli.input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read path listing from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(&cli.input)
            .with_context(|| format!("Failed to read path listing {}", cli.input.display()))
    }
}

fn main() {
    let cli = Cli::parse();

    let mut context = match CliContext::new(cli.workspace.clone(), cli.config.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            process::exit(1);
        }
    };
    context.apply_log_overrides(&cli);
    if let Err(e) = init_logging(Some(&context.config().logging)) {
        eprintln!("Error initializing logging: {}", e);
        process::exit(1);
    }

    let listing = match read_listing(&cli) {
        Ok(listing) => listing,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    };

    match context.execute(&listing, &cli.command) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
