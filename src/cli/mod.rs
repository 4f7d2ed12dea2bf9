//! Command-line interface for repodist.
//!
//! Each command lives in its own module with its own argument struct and
//! an async `execute` method; this module holds the root [`Cli`] parser,
//! the global flags shared by every command, and logging setup.

mod init;
mod setup;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Root command-line parser.
#[derive(Debug, Parser)]
#[command(
    name = "repodist",
    version,
    about = "Create and distribute individualized exercise repositories",
    long_about = "repodist designs, individualizes and distributes software \
engineering exercises as Git repositories: it groups students, names one \
repository per group from a template, runs the external generator, and \
creates the projects and memberships on the hosting platform."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, global = true, default_value = "info")]
    log_level: String,

    /// Home directory of all the repodist checkouts.
    #[arg(short = 'm', long, global = true)]
    home: Option<String>,

    /// Path to the repository config file (defaults to the one inside
    /// the generator checkout).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Answer destructive-operation prompts with yes.
    #[arg(short = 'y', long = "yes", global = true)]
    yes: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create a starter repositoryConfig.json.
    Init(init::InitCommand),

    /// Set up group repositories from the configured members or a roster
    /// table.
    Setup(setup::SetupCommand),
}

/// Global flags passed down to the commands.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    /// `--home` value, unresolved.
    pub home: Option<String>,
    /// `--config` value.
    pub config: Option<PathBuf>,
    /// `--yes` flag.
    pub assume_yes: bool,
}

impl Cli {
    /// Install the tracing subscriber according to `--log-level`.
    ///
    /// An explicit `RUST_LOG` in the environment wins over the flag.
    pub fn init_logging(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(&self.log_level));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    /// Dispatch to the selected command.
    pub async fn execute(self) -> Result<()> {
        let globals = GlobalArgs {
            home: self.home,
            config: self.config,
            assume_yes: self.yes,
        };
        match self.command {
            Commands::Init(cmd) => cmd.execute().await,
            Commands::Setup(cmd) => cmd.execute(&globals).await,
        }
    }
}
