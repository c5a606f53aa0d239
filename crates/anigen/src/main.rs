//! Anigen CLI binary.
//!
//! This binary drives the storyboard wizard from the command line:
//! - Parse a script and inspect each step
//! - Assign images, voices and background music
//! - Generate speech and export the video

use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    use cli::{Cli, run};

    // Parse command-line arguments
    let cli = Cli::parse();

    // Pick up ANIGEN__* overrides and RUST_LOG from a local .env
    let _ = dotenvy::dotenv();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    // Execute the requested command
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::debug!(error = %e, "Command failed");
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}
