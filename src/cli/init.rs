//! The `init` command: write a starter repository configuration.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::debug;

use crate::config::{starter_config_json, REPOSITORY_CONFIG_FILE_NAME};

/// Create a starter `repositoryConfig.json` in the current directory.
///
/// The generated file lists one example member group and a naming
/// pattern using the template functions, ready to be edited for a
/// course.
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Where to write the configuration (defaults to
    /// `repositoryConfig.json` in the current directory).
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

impl InitCommand {
    /// Run the command.
    pub async fn execute(self) -> Result<()> {
        let path = self
            .path
            .unwrap_or_else(|| PathBuf::from(REPOSITORY_CONFIG_FILE_NAME));
        debug!(path = %path.display(), "initializing repository config");

        if path.exists() && !self.force {
            bail!(
                "{} already exists; pass --force to overwrite it",
                path.display()
            );
        }

        tokio::fs::write(&path, starter_config_json()).await?;
        println!("{} {}", "Created".green().bold(), path.display());
        Ok(())
    }
}
