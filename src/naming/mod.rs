//! Repository naming and grouping engine.
//!
//! This is the algorithmic core of repodist: given either explicit member
//! groups or a roster table, it groups identifiers, renders a
//! user-supplied naming pattern once per group, and sanitizes the result
//! into a hosting-platform-legal slug.
//!
//! # Pipeline
//!
//! 1. [`GroupingOptions`] merges configuration defaults with caller
//!    overrides (builder, last writer wins).
//! 2. [`name_grouped_repositories`] / [`group_and_name_repositories`]
//!    build the groups and their render contexts.
//! 3. [`NameTemplate`](renderer::NameTemplate) evaluates the pattern per
//!    group, with the [`NamingSession`] functions (`now`, `creation`,
//!    `hash`, `uuid`, `autoincrement`) available inside it.
//! 4. [`clean_project_name`] turns each rendered name into a slug.
//!
//! The engine is synchronous, performs no network I/O and persists
//! nothing; deciding what to do with the resulting [`GroupMap`] (display
//! it, create projects remotely) is the caller's business.
//!
//! # Example
//!
//! ```
//! use repodist::naming::{
//!     name_grouped_repositories, GroupingOptions, NamingSession,
//! };
//!
//! let options = GroupingOptions::builder()
//!     .naming_pattern("exercise-{{ usernames.0 }}")
//!     .groups(vec![vec!["alice".to_string()]])
//!     .build();
//! let named = name_grouped_repositories(&options, &NamingSession::new())?;
//! assert_eq!(named["exercise-alice"].name, "exercise-alice");
//! # Ok::<(), repodist::naming::NamingError>(())
//! ```

mod error;
mod functions;
mod groups;
mod options;
mod renderer;
mod sanitize;

pub use error::NamingError;
pub use functions::NamingSession;
pub use groups::{
    group_and_name_repositories, name_grouped_repositories, GroupData, GroupMap, Record,
    USERNAME_COLUMN,
};
pub use options::{GroupingOptions, GroupingOptionsBuilder};
pub use sanitize::clean_project_name;
