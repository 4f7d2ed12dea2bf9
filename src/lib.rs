//! repodist - create and distribute individualized exercise repositories.
//!
//! repodist helps lecturers design, individualize and distribute software
//! engineering exercises as Git repositories: students are grouped (from
//! explicit member lists or a roster table), each group's repository name
//! is rendered from a template and sanitized into a hosting-platform-legal
//! slug, the external generator produces the repository contents, and the
//! projects and memberships are created through the GitLab API.
//!
//! # Core Modules
//!
//! - [`naming`] - The grouping and naming engine: options, group
//!   building, template rendering with stateful naming functions, and
//!   slug sanitization. Synchronous and side-effect free.
//! - [`cli`] - Command-line interface (`init`, `setup`).
//! - [`config`] - The repository configuration file and the on-disk
//!   workspace layout.
//! - [`gitlab`] - Minimal hosting-platform REST client.
//! - [`generator`] - Invocation of the external generator process.
//! - [`core`] - Error types and user-facing error presentation.
//!
//! # Example
//!
//! ```
//! use repodist::naming::{
//!     name_grouped_repositories, GroupingOptions, NamingSession,
//! };
//!
//! let options = GroupingOptions::builder()
//!     .naming_pattern("group-{{ usernames.0 }}-{{ usernames.1 }}")
//!     .groups(vec![vec!["alice".to_string(), "bob".to_string()]])
//!     .build();
//!
//! let named = name_grouped_repositories(&options, &NamingSession::new())?;
//! assert_eq!(named["group-alice-bob"].name, "group-alice-bob");
//! # Ok::<(), repodist::naming::NamingError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod generator;
pub mod gitlab;
pub mod naming;
