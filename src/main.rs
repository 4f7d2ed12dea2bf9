//! repodist CLI entry point.
//!
//! Parses arguments, installs logging, runs the selected command, and
//! renders failures through the user-friendly error presenter before
//! exiting non-zero.

use anyhow::Result;
use clap::Parser;
use repodist::cli::Cli;
use repodist::core::user_friendly_error;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    cli.init_logging();

    match cli.execute().await {
        Ok(()) => Ok(()),
        Err(e) => {
            let context = user_friendly_error(e);
            context.display();
            std::process::exit(1);
        }
    }
}
