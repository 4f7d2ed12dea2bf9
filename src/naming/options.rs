//! Grouping options and their builder.
//!
//! The builder replaces the original functional-options style with named
//! setters: the caller seeds it with defaults from the loaded repository
//! configuration, then applies command-line overrides in order. The last
//! writer for a field wins. No validation happens here; a missing table
//! path or naming pattern surfaces later, in the group builder or the
//! renderer.

use std::path::PathBuf;

/// Options for one grouping-and-naming operation.
///
/// Exactly one of `groups` or (`table_path` + `group_by`) is meaningful
/// for a given call; the entry point the caller picks,
/// [`name_grouped_repositories`](super::name_grouped_repositories) or
/// [`group_and_name_repositories`](super::group_and_name_repositories),
/// determines which.
#[derive(Debug, Clone, Default)]
pub struct GroupingOptions {
    /// Path to the roster table (table mode).
    pub table_path: Option<PathBuf>,
    /// The naming pattern rendered once per group.
    pub naming_pattern: String,
    /// Column whose value groups table rows (table mode).
    pub group_by: Option<String>,
    /// Explicit member groups, outer and inner order preserved
    /// (explicit mode).
    pub groups: Vec<Vec<String>>,
}

impl GroupingOptions {
    /// Start building options from empty defaults.
    #[must_use]
    pub fn builder() -> GroupingOptionsBuilder {
        GroupingOptionsBuilder::default()
    }
}

/// Builder for [`GroupingOptions`]; later setters override earlier ones.
#[derive(Debug, Clone, Default)]
pub struct GroupingOptionsBuilder {
    options: GroupingOptions,
}

impl GroupingOptionsBuilder {
    /// Set the path to the roster table file.
    #[must_use]
    pub fn table_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.table_path = Some(path.into());
        self
    }

    /// Set the naming pattern for the repositories to be created.
    #[must_use]
    pub fn naming_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.options.naming_pattern = pattern.into();
        self
    }

    /// Set the column name to group table rows by.
    #[must_use]
    pub fn group_by(mut self, column: impl Into<String>) -> Self {
        self.options.group_by = Some(column.into());
        self
    }

    /// Provide grouped member identifiers directly.
    #[must_use]
    pub fn groups(mut self, groups: Vec<Vec<String>>) -> Self {
        self.options.groups = groups;
        self
    }

    /// Finish building.
    #[must_use]
    pub fn build(self) -> GroupingOptions {
        self.options
    }
}
