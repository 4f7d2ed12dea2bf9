//! The `setup` command: group members, name repositories, and either
//! show the result (dry-run) or distribute for real.
//!
//! Option resolution follows defaults-then-overrides: the loaded
//! repository configuration seeds the grouping options (naming pattern,
//! member groups), and the `--naming`, `--table` and `--group-by` flags
//! override it. Passing `--table` switches from the configured explicit
//! groups to table mode.

use anyhow::{bail, Result};
use clap::Args;
use colored::Colorize;
use std::path::PathBuf;
use tracing::{debug, info};

use super::GlobalArgs;
use crate::config::{resolve_home, GeneratorWorkspace, RepositoryConfigFile};
use crate::core::RepodistError;
use crate::generator::run_generator;
use crate::gitlab::GitLabClient;
use crate::naming::{
    group_and_name_repositories, name_grouped_repositories, GroupMap, GroupingOptions,
    NamingSession,
};

/// Create several repositories for individual students or student groups.
///
/// Examples:
///
///   repodist setup --dry-run --details
///
///   repodist setup --naming 'lab-{{ now(format="%Y") }}-{{ group }}-{{ autoincrement() }}' \
///       --table roster.csv --group-by group --dry-run
#[derive(Debug, Args)]
pub struct SetupCommand {
    /// Name template for the repositories to be created.
    #[arg(short, long)]
    naming: Option<String>,

    /// Path to a roster table (CSV with a header row); enables table mode.
    #[arg(short, long)]
    table: Option<PathBuf>,

    /// Column name to group table rows by.
    #[arg(short, long)]
    group_by: Option<String>,

    /// Just tell what you would do, but don't do it yet.
    #[arg(long)]
    dry_run: bool,

    /// Show every record of each group in the dry-run output.
    #[arg(short, long)]
    details: bool,
}

impl SetupCommand {
    /// Run the command.
    pub async fn execute(self, globals: &GlobalArgs) -> Result<()> {
        debug!("setup command started");
        let home = resolve_home(globals.home.as_deref())?;
        let workspace = GeneratorWorkspace::new(&home);

        let config_path = globals
            .config
            .clone()
            .unwrap_or_else(|| workspace.repository_config_file.clone());
        let config = RepositoryConfigFile::load(&config_path).await?;

        if config.is_destructive() && !globals.assume_yes {
            bail!(
                "the repository config disables local mode and sets \
                 deleteExistingRepositories, which wipes every repository in \
                 the target group; pass --yes if that is really intended"
            );
        }

        let named = self.group_and_name(&config)?;
        info!(groups = named.len(), "repository names computed");

        if self.dry_run {
            self.print_simulation(&named);
            return Ok(());
        }

        workspace.validate()?;
        run_generator(&workspace.root, false).await?;

        if config.content.general.local_mode {
            info!(
                output = %workspace.output_dir.display(),
                "local mode: generated repositories stay on disk"
            );
            return Ok(());
        }

        let client = GitLabClient::from_env()?;
        client
            .create_group_repositories(&named, &config.content.remote)
            .await?;
        Ok(())
    }

    /// Resolve grouping options and run the matching strategy.
    fn group_and_name(&self, config: &RepositoryConfigFile) -> Result<GroupMap, RepodistError> {
        let mut builder = GroupingOptions::builder()
            .naming_pattern(config.content.repository.repository_name.as_str())
            .groups(config.content.repository.repository_members.clone());
        if let Some(naming) = &self.naming {
            builder = builder.naming_pattern(naming.as_str());
        }
        if let Some(table) = &self.table {
            builder = builder.table_path(table);
        }
        if let Some(group_by) = &self.group_by {
            builder = builder.group_by(group_by.as_str());
        }
        let options = builder.build();

        let session = NamingSession::new();
        let named = if options.table_path.is_some() {
            group_and_name_repositories(&options, &session)?
        } else {
            name_grouped_repositories(&options, &session)?
        };
        Ok(named)
    }

    /// Print the sanitized names (and optionally every record) without
    /// touching anything.
    fn print_simulation(&self, named: &GroupMap) {
        println!();
        println!("Simulated repository names:");
        for group in named.values() {
            print!("\t{}", group.name.yellow());
            if self.details {
                println!();
                for record in &group.records {
                    let fields: Vec<String> = record
                        .iter()
                        .map(|(column, value)| {
                            format!("{} {value}", format!("{column}:").dimmed())
                        })
                        .collect();
                    println!("\t   {}", fields.join(", "));
                }
            } else {
                let count = group.records.len();
                println!(" {}", format!("({count} records)").dimmed());
            }
        }
        println!();
    }
}
