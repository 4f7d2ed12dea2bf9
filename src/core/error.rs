//! Error handling for repodist.
//!
//! Two layers: [`RepodistError`] is the strongly-typed error enum used
//! throughout the crate, and [`ErrorContext`] wraps any error with a
//! user-facing message, an optional suggestion and optional details for
//! display right before a non-zero exit. [`user_friendly_error`] converts
//! an `anyhow::Error` chain into an [`ErrorContext`], attaching
//! suggestions for the failure modes users actually hit (missing config,
//! missing token, missing generator checkout).

use colored::Colorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::gitlab::GitLabError;
use crate::naming::NamingError;

/// The main error type for repodist operations.
#[derive(Debug, Error)]
pub enum RepodistError {
    /// The repository configuration file does not exist.
    #[error("repository config file not found: {}", path.display())]
    ConfigNotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The repository configuration file exists but is not valid JSON of
    /// the expected shape.
    #[error("invalid repository config file {}", path.display())]
    ConfigParse {
        /// Path of the offending file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The workspace (tool home + generator checkout) is missing
    /// required directories or files.
    #[error("workspace is missing required paths: {}", format_paths(paths))]
    MissingWorkspacePaths {
        /// Every missing path, so the user can fix all of them at once.
        paths: Vec<PathBuf>,
    },

    /// No home directory could be determined for the current user.
    #[error("could not determine a home directory for the current user")]
    NoHomeDirectory,

    /// Naming/grouping failed.
    #[error(transparent)]
    Naming(#[from] NamingError),

    /// A hosting-platform API call failed.
    #[error(transparent)]
    GitLab(#[from] GitLabError),

    /// The external generator process failed.
    #[error("generator run failed: {reason}")]
    Generator {
        /// What went wrong, including captured stderr where available.
        reason: String,
    },

    /// Plain I/O failure outside the cases above.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// An error plus the guidance shown to the user alongside it.
pub struct ErrorContext {
    /// The underlying error.
    pub error: anyhow::Error,
    /// A short, actionable suggestion.
    pub suggestion: Option<String>,
    /// Extra background for the curious.
    pub details: Option<String>,
}

impl ErrorContext {
    /// Wrap an error with no guidance attached yet.
    #[must_use]
    pub fn new(error: anyhow::Error) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Attach a suggestion line.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Attach a details line.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error (and its cause chain), suggestion and details to
    /// stderr, colored when the terminal supports it.
    pub fn display(&self) {
        eprintln!("{} {}", "error:".red().bold(), self.error);

        for cause in self.error.chain().skip(1) {
            eprintln!("  {} {}", "caused by:".dimmed(), cause);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("\n{} {}", "suggestion:".yellow().bold(), suggestion);
        }

        if let Some(details) = &self.details {
            eprintln!("{} {}", "details:".dimmed(), details);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nsuggestion: {suggestion}")?;
        }
        if let Some(details) = &self.details {
            write!(f, "\ndetails: {details}")?;
        }
        Ok(())
    }
}

/// Convert any error into an [`ErrorContext`] with a suggestion where a
/// known failure mode is recognized in the chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(repodist_error) = error.downcast_ref::<RepodistError>() {
        return match repodist_error {
            RepodistError::ConfigNotFound { .. } => ErrorContext::new(error).with_suggestion(
                "run `repodist init` to create a starter repositoryConfig.json, \
                 or pass --config with the path to an existing one",
            ),
            RepodistError::ConfigParse { .. } => ErrorContext::new(error)
                .with_suggestion("check the file for JSON syntax errors and misspelled keys"),
            RepodistError::MissingWorkspacePaths { .. } => {
                ErrorContext::new(error).with_suggestion(
                    "point --home (or REPODIST_HOME) at the directory containing the \
                     generator checkout",
                )
            }
            RepodistError::Naming(NamingError::TableOpen { .. }) => ErrorContext::new(error)
                .with_suggestion("check the --table path; it must point to a readable CSV file"),
            RepodistError::Naming(
                NamingError::PatternParse { .. } | NamingError::PatternRender { .. },
            ) => ErrorContext::new(error).with_suggestion(
                "check the naming pattern; fields must exist in the group data, e.g. \
                 `{{ usernames.0 }}-project` or `{{ group }}-{{ uuid() }}`",
            ),
            RepodistError::Generator { .. } => ErrorContext::new(error)
                .with_suggestion("run `npm install` in the generator checkout and retry"),
            _ => ErrorContext::new(error),
        };
    }

    if let Some(gitlab_error) = error.downcast_ref::<GitLabError>() {
        return match gitlab_error {
            GitLabError::MissingToken => ErrorContext::new(error).with_suggestion(
                "export REPODIST_GITLAB_TOKEN with a token that may create projects \
                 in the target group",
            ),
            _ => ErrorContext::new(error)
                .with_suggestion("check REPODIST_GITLAB_URL and the token's permissions"),
        };
    }

    ErrorContext::new(error)
}
