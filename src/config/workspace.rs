//! Tool home and generator checkout layout.
//!
//! All repodist repositories live under one home directory, resolved from
//! the `--home` flag, the `REPODIST_HOME` environment variable, or
//! `~/repodist` as a last resort. The external generator is expected as a
//! checkout beneath it; this module knows the paths inside that checkout
//! and validates their existence up front, reporting every missing path
//! at once instead of failing on the first.

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::repository::REPOSITORY_CONFIG_FILE_NAME;
use crate::core::RepodistError;

/// Environment variable overriding the home directory.
pub const HOME_ENV: &str = "REPODIST_HOME";

/// Directory name of the generator checkout inside the home directory.
pub const GENERATOR_DIR_NAME: &str = "repodist-generator";

/// Resolve the home directory: flag, then environment, then `~/repodist`.
///
/// A leading `~` in the flag or environment value is expanded.
pub fn resolve_home(flag: Option<&str>) -> Result<PathBuf, RepodistError> {
    if let Some(home) = flag {
        return Ok(PathBuf::from(shellexpand::tilde(home).into_owned()));
    }
    if let Ok(home) = std::env::var(HOME_ENV) {
        if !home.is_empty() {
            return Ok(PathBuf::from(shellexpand::tilde(&home).into_owned()));
        }
    }
    let user_home = dirs::home_dir().ok_or(RepodistError::NoHomeDirectory)?;
    Ok(user_home.join("repodist"))
}

/// All paths used inside the generator checkout, as full paths.
#[derive(Debug, Clone)]
pub struct GeneratorWorkspace {
    /// Root of the generator checkout.
    pub root: PathBuf,
    /// Generator configuration directory.
    pub config_dir: PathBuf,
    /// The repository configuration file inside the checkout.
    pub repository_config_file: PathBuf,
    /// Where local-mode output lands.
    pub output_dir: PathBuf,
}

impl GeneratorWorkspace {
    /// Lay out the workspace beneath `home`.
    #[must_use]
    pub fn new(home: &Path) -> Self {
        let root = home.join(GENERATOR_DIR_NAME);
        let config_dir = root.join("resources").join("config");
        let repository_config_file = config_dir.join(REPOSITORY_CONFIG_FILE_NAME);
        let output_dir = root.join("resources").join("output");
        let workspace = Self {
            root,
            config_dir,
            repository_config_file,
            output_dir,
        };
        debug!(root = %workspace.root.display(), "resolved generator workspace");
        workspace
    }

    /// Check that every required path exists.
    ///
    /// # Errors
    ///
    /// [`RepodistError::MissingWorkspacePaths`] listing all absent paths.
    pub fn validate(&self) -> Result<(), RepodistError> {
        let missing: Vec<PathBuf> = [
            &self.root,
            &self.config_dir,
            &self.repository_config_file,
            &self.output_dir,
        ]
        .into_iter()
        .filter(|path| !path.exists())
        .cloned()
        .collect();

        if missing.is_empty() {
            info!(root = %self.root.display(), "generator workspace validated");
            Ok(())
        } else {
            Err(RepodistError::MissingWorkspacePaths { paths: missing })
        }
    }
}
