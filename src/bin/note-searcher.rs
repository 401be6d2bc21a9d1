use clap::Parser;
use colored::*;
use std::process::exit;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use note_searcher::cli::{handle_command, CliArgs};

fn main() {
    // --- Setup Tracing ---
    // Stderr stays quiet unless RUST_LOG asks for more; callers treat stderr output as failure.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    // --- Parse Args ---
    let args = CliArgs::parse();

    // --- Execute Command ---
    tracing::info!("Executing command: {:?}", args.command);
    if let Err(e) = handle_command(args) {
        tracing::error!("Command execution failed: {:#}", e);
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        exit(1);
    }
    tracing::debug!("Command executed successfully.");
}
