//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `spf_flattener` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use spf_flattener::initialization::init_logger_with;
use spf_flattener::{run_flatten, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    // Run the flattening pass using the library
    match run_flatten(config).await {
        Ok(report) => {
            // Print user-friendly summary
            println!(
                "Flattened {} domain{} ({} resolved, {} failed) in {:.1}s",
                report.total_domains,
                if report.total_domains == 1 { "" } else { "s" },
                report.resolved,
                report.failed,
                report.elapsed_seconds
            );
            println!("Results saved to {}", report.output_path.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("spf_flattener error: {:#}", e);
            process::exit(1);
        }
    }
}
