//! The repository configuration file (`repositoryConfig.json`).
//!
//! This is the JSON file the external generator consumes; repodist reads
//! it for the naming pattern and the member groups, and rewrites it when
//! a command mutates generator settings. Every section defaults so that
//! partial files (common in course setups that only fill in the
//! `repository` section) load cleanly.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

use crate::core::RepodistError;

/// In-memory model of `repositoryConfig.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositoryConfig {
    /// Generator-wide switches.
    pub general: GeneralSection,
    /// What to create: naming pattern, count, member groups.
    pub repository: RepositorySection,
    /// Persistence of previously individualized repositories.
    pub individual_repository_persist: PersistSection,
    /// Local-mode settings.
    pub local: LocalSection,
    /// Remote-mode settings (hosting-platform ids).
    pub remote: RemoteSection,
    /// Overview-file generation settings.
    pub overview: OverviewSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GeneralSection {
    /// Generate into the local output directory instead of the platform.
    pub local_mode: bool,
    /// Also create the test repository per group.
    pub create_test_repository: bool,
    /// Individualize repository contents per group.
    pub variate_repositories: bool,
    /// Strip sample solutions from generated repositories.
    pub delete_solution: bool,
    /// Warn about unresolved variable values during generation.
    pub activate_variable_value_warnings: bool,
    /// Upper bound on parallel generator workers.
    pub max_concurrent_workers: u32,
    /// Log level the generator itself runs with.
    pub global_log_level: String,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            local_mode: true,
            create_test_repository: false,
            variate_repositories: true,
            delete_solution: false,
            activate_variable_value_warnings: true,
            max_concurrent_workers: 1,
            global_log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RepositorySection {
    /// Naming pattern for generated repositories (a Tera template).
    pub repository_name: String,
    /// Number of repositories to generate when no members are listed.
    pub repository_count: u32,
    /// Explicit member groups, one inner list per repository.
    pub repository_members: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersistSection {
    /// Reuse the member-to-repository assignment from an earlier run.
    pub use_saved_individual_repositories: bool,
    /// File the earlier assignment was saved to.
    pub saved_individual_repositories_file_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocalSection {
    /// Path of the origin repository checkout used in local mode.
    pub origin_repository_file_path: String,
    /// Restrict generation to these subpaths.
    pub subset_paths: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RemoteSection {
    /// Project id of the origin repository on the platform.
    pub origin_repository_id: u64,
    /// Namespace the code repositories are created in.
    pub code_repository_target_group_id: u64,
    /// Namespace the test repositories are created in.
    pub test_repository_target_group_id: u64,
    /// Delete all existing repositories in the target group first.
    pub delete_existing_repositories: bool,
    /// Grant members Guest instead of Developer access.
    pub add_users_as_guests: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverviewSection {
    /// Generate an overview file of all created repositories.
    pub generate_overview: bool,
    /// Repository the overview file is pushed to.
    pub overview_repository_id: u64,
    /// File name of the generated overview.
    pub overview_file_name: String,
}

/// A repository configuration bound to its on-disk location.
#[derive(Debug, Clone)]
pub struct RepositoryConfigFile {
    /// Where the file lives.
    pub path: PathBuf,
    /// The parsed content.
    pub content: RepositoryConfig,
}

impl RepositoryConfigFile {
    /// Load and parse the configuration at `path`.
    ///
    /// # Errors
    ///
    /// [`RepodistError::ConfigNotFound`] when the file is absent,
    /// [`RepodistError::ConfigParse`] when it is not valid JSON of the
    /// expected shape.
    pub async fn load(path: impl Into<PathBuf>) -> Result<Self, RepodistError> {
        let path = path.into();
        debug!(path = %path.display(), "loading repository config");

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RepodistError::ConfigNotFound { path });
            }
            Err(e) => return Err(RepodistError::Io(e)),
        };

        let content = serde_json::from_str(&raw)
            .map_err(|source| RepodistError::ConfigParse { path: path.clone(), source })?;

        Ok(Self { path, content })
    }

    /// Write the configuration back to its path, pretty-printed.
    pub async fn save(&self) -> Result<(), RepodistError> {
        debug!(path = %self.path.display(), "saving repository config");
        let rendered = serde_json::to_string_pretty(&self.content)
            .map_err(|source| RepodistError::ConfigParse { path: self.path.clone(), source })?;
        tokio::fs::write(&self.path, rendered).await?;
        Ok(())
    }

    /// Whether this configuration would delete existing repositories on
    /// the platform when executed.
    ///
    /// Remote mode combined with `deleteExistingRepositories` wipes the
    /// whole target group; commands refuse that combination without an
    /// explicit `--yes`.
    #[must_use]
    pub fn is_destructive(&self) -> bool {
        !self.content.general.local_mode && self.content.remote.delete_existing_repositories
    }
}

/// Render a starter configuration for `repodist init`.
#[must_use]
pub fn starter_config_json() -> String {
    let mut config = RepositoryConfig::default();
    config.repository.repository_name =
        "exercise-{{ usernames.0 }}-{{ now(format=\"%Y\") }}".to_string();
    config.repository.repository_members =
        vec![vec!["firstStudent".to_string(), "secondStudent".to_string()]];
    // Defaults are serializable; a failure here would be a bug in the
    // model, not in user input.
    serde_json::to_string_pretty(&config).unwrap_or_default()
}

/// Default file name of the repository configuration.
pub const REPOSITORY_CONFIG_FILE_NAME: &str = "repositoryConfig.json";
