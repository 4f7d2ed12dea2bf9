//! Group building: turning raw member input into named groups.
//!
//! Two interchangeable strategies produce the same output shape:
//!
//! - [`name_grouped_repositories`] consumes explicit member groups, as
//!   listed under `repositoryMembers` in the repository configuration;
//! - [`group_and_name_repositories`] consumes a roster table (CSV with a
//!   header row) and groups rows by a configured column.
//!
//! Either way the result maps each group's *raw* rendered name to the
//! group's records and its sanitized slug.

use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tera::Context;
use tracing::debug;

use super::error::NamingError;
use super::functions::NamingSession;
use super::options::GroupingOptions;
use super::renderer::NameTemplate;
use super::sanitize::clean_project_name;

/// Column name used for members handed in as explicit groups, and the
/// fixed `group` label those groups render with.
pub const USERNAME_COLUMN: &str = "username";

/// One row of input data: an ordered mapping from column name to value.
///
/// In table mode the keys mirror the table header; in explicit-group mode
/// each record has the single key [`USERNAME_COLUMN`].
pub type Record = IndexMap<String, String>;

/// The records and the sanitized repository name of one group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupData {
    /// Every record belonging to the group, in input order.
    pub records: Vec<Record>,
    /// The hosting-platform-legal slug derived from the rendered name.
    pub name: String,
}

/// Result of a grouping operation, keyed by *raw* rendered name (before
/// sanitization) in group-discovery order.
///
/// If two distinct groups render to the same raw name, the later group
/// silently replaces the earlier entry. This mirrors the long-standing
/// behavior of the tool; callers that need collision detection must
/// compare group counts themselves.
pub type GroupMap = IndexMap<String, GroupData>;

/// Name repositories for explicitly grouped member identifiers.
///
/// For each group, in input order, one record per member is built as
/// `{"username": member}`, the naming pattern is rendered with the
/// context `usernames` (the group's members, order preserved) and `group`
/// (the fixed label `"username"`), and the result is inserted into the
/// returned map.
///
/// # Errors
///
/// Fails if the naming pattern does not parse or does not render; no
/// partial map is returned.
pub fn name_grouped_repositories(
    options: &GroupingOptions,
    session: &NamingSession,
) -> Result<GroupMap, NamingError> {
    let template = NameTemplate::parse(&options.naming_pattern, session)?;
    let mut named = GroupMap::new();

    for group in &options.groups {
        let records: Vec<Record> = group
            .iter()
            .map(|member| {
                Record::from_iter([(USERNAME_COLUMN.to_string(), member.clone())])
            })
            .collect();

        let mut context = Context::new();
        context.insert("usernames", group);
        context.insert("group", USERNAME_COLUMN);

        let raw_name = template.render(&context)?;
        debug!(group = %raw_name, members = group.len(), "named explicit group");
        let name = clean_project_name(&raw_name);
        named.insert(raw_name, GroupData { records, name });
    }

    Ok(named)
}

/// Group a roster table by a column and name each group.
///
/// The table is a delimited file whose first row is the header. Rows are
/// grouped by the value of the `group_by` column; rows where the column
/// is absent fall back to the empty-string key and group together. A row
/// shorter than the header simply leaves the trailing fields absent.
///
/// A group's name is rendered when its key is first encountered, from
/// that row alone: the row's fields are exposed to the pattern as flat
/// variables (`{{ group }}` for a column named `group`, and so on).
/// Later rows of the same group extend the record list but never
/// re-render the name.
///
/// # Errors
///
/// Fails if the table cannot be opened or read, or if the naming pattern
/// does not parse or render; no partial map is returned.
pub fn group_and_name_repositories(
    options: &GroupingOptions,
    session: &NamingSession,
) -> Result<GroupMap, NamingError> {
    let template = NameTemplate::parse(&options.naming_pattern, session)?;
    let table_path = options.table_path.as_deref().unwrap_or_else(|| Path::new(""));
    let group_by = options.group_by.as_deref().unwrap_or("");

    let file = File::open(table_path).map_err(|source| NamingError::TableOpen {
        path: table_path.to_path_buf(),
        source,
    })?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let header = reader
        .headers()
        .map_err(|source| NamingError::TableHeader {
            path: table_path.to_path_buf(),
            source,
        })?
        .clone();

    let mut named = GroupMap::new();
    // Group key -> raw rendered name, so follow-up rows can be appended
    // without rendering again.
    let mut raw_names: HashMap<String, String> = HashMap::new();

    for row in reader.records() {
        let row = row.map_err(|source| NamingError::TableRecord {
            path: table_path.to_path_buf(),
            source,
        })?;
        let record: Record = header
            .iter()
            .zip(row.iter())
            .map(|(column, value)| (column.to_string(), value.to_string()))
            .collect();

        let key = record.get(group_by).cloned().unwrap_or_default();

        if let Some(raw_name) = raw_names.get(&key) {
            if let Some(group) = named.get_mut(raw_name) {
                group.records.push(record);
            }
            continue;
        }

        let mut context = Context::new();
        for (column, value) in &record {
            context.insert(column.as_str(), value);
        }
        let raw_name = template.render(&context)?;
        debug!(group = %key, name = %raw_name, "named table group");
        let name = clean_project_name(&raw_name);
        named.insert(
            raw_name.clone(),
            GroupData {
                records: vec![record],
                name,
            },
        );
        raw_names.insert(key, raw_name);
    }

    Ok(named)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn record(fields: &[(&str, &str)]) -> Record {
        fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn explicit_options(pattern: &str, groups: &[&[&str]]) -> GroupingOptions {
        GroupingOptions::builder()
            .naming_pattern(pattern)
            .groups(
                groups
                    .iter()
                    .map(|g| g.iter().map(|member| member.to_string()).collect())
                    .collect(),
            )
            .build()
    }

    fn table_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn names_a_single_explicit_group() {
        let options = explicit_options(
            "group-{{ usernames.0 }}-{{ usernames.1 }}",
            &[&["alice", "bob"]],
        );
        let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();

        assert_eq!(named.len(), 1);
        let group = &named["group-alice-bob"];
        assert_eq!(group.name, "group-alice-bob");
        assert_eq!(
            group.records,
            vec![
                record(&[("username", "alice")]),
                record(&[("username", "bob")]),
            ]
        );
    }

    #[test]
    fn names_multiple_explicit_groups_independently() {
        let options = explicit_options(
            "group-{{ usernames.0 }}-{{ usernames.1 }}",
            &[&["alice", "bob"], &["charlie", "dave"]],
        );
        let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();

        assert_eq!(
            named.keys().collect::<Vec<_>>(),
            vec!["group-alice-bob", "group-charlie-dave"]
        );
        assert_eq!(
            named["group-charlie-dave"].records,
            vec![
                record(&[("username", "charlie")]),
                record(&[("username", "dave")]),
            ]
        );
    }

    #[test]
    fn explicit_group_context_exposes_the_group_label() {
        let options = explicit_options("{{ group }}-batch", &[&["alice"]]);
        let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();
        assert!(named.contains_key("username-batch"));
    }

    #[test]
    fn explicit_rendered_names_are_sanitized_but_keys_are_raw() {
        let options = explicit_options("Gruppe {{ usernames.0 }}!", &[&["jörg"]]);
        let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();
        let group = &named["Gruppe jörg!"];
        assert_eq!(group.name, "Gruppe-joerg");
    }

    #[test]
    fn identical_explicit_groups_collapse_to_the_last_one() {
        let options = explicit_options(
            "group-{{ usernames.0 }}",
            &[&["alice", "bob"], &["alice", "eve"]],
        );
        let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();

        // Both groups render to "group-alice"; the later one wins.
        assert_eq!(named.len(), 1);
        assert_eq!(
            named["group-alice"].records,
            vec![
                record(&[("username", "alice")]),
                record(&[("username", "eve")]),
            ]
        );
    }

    #[test]
    fn undefined_field_aborts_explicit_grouping() {
        let options = explicit_options("{{ unknown }}-project", &[&["alice"]]);
        let err = name_grouped_repositories(&options, &NamingSession::new()).unwrap_err();
        assert!(matches!(err, NamingError::PatternRender { .. }));
    }

    #[test]
    fn groups_table_rows_by_column() {
        let table = table_file("campusID,group\nalice,A\nbob,A\njohn,B\n");
        let options = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("{{ group }}-project")
            .group_by("group")
            .build();
        let named = group_and_name_repositories(&options, &NamingSession::new()).unwrap();

        assert_eq!(
            named.keys().collect::<Vec<_>>(),
            vec!["A-project", "B-project"]
        );
        assert_eq!(
            named["A-project"].records,
            vec![
                record(&[("campusID", "alice"), ("group", "A")]),
                record(&[("campusID", "bob"), ("group", "A")]),
            ]
        );
        assert_eq!(
            named["B-project"].records,
            vec![record(&[("campusID", "john"), ("group", "B")])]
        );
        assert_eq!(named["A-project"].name, "A-project");
    }

    #[test]
    fn table_group_name_comes_from_the_first_row_only() {
        let table = table_file("campusID,group\nalice,A\nbob,A\n");
        let options = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("{{ group }}-{{ campusID }}")
            .group_by("group")
            .build();
        let named = group_and_name_repositories(&options, &NamingSession::new()).unwrap();

        // bob's row joins the group but never re-renders the name.
        assert_eq!(named.keys().collect::<Vec<_>>(), vec!["A-alice"]);
        assert_eq!(named["A-alice"].records.len(), 2);
    }

    #[test]
    fn rows_shorter_than_the_header_leave_fields_absent() {
        let table = table_file("campusID,group,email\nalice,A\nbob,A,bob@example.org\n");
        let options = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("{{ group }}-project")
            .group_by("group")
            .build();
        let named = group_and_name_repositories(&options, &NamingSession::new()).unwrap();

        let records = &named["A-project"].records;
        assert_eq!(records[0], record(&[("campusID", "alice"), ("group", "A")]));
        assert_eq!(
            records[1],
            record(&[
                ("campusID", "bob"),
                ("group", "A"),
                ("email", "bob@example.org"),
            ])
        );
    }

    #[test]
    fn rows_missing_the_group_column_share_the_empty_key() {
        let table = table_file("campusID\nalice\nbob\n");
        let options = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("{{ campusID }}-project")
            .group_by("group")
            .build();
        let named = group_and_name_repositories(&options, &NamingSession::new()).unwrap();

        // Every row lacks a "group" column, so all of them group together
        // under the empty-string key; the name comes from the first row.
        assert_eq!(named.keys().collect::<Vec<_>>(), vec!["alice-project"]);
        assert_eq!(named["alice-project"].records.len(), 2);
    }

    #[test]
    fn undefined_field_aborts_table_grouping() {
        let table = table_file("campusID,group\nalice,A\n");
        let options = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("{{ unknown }}-project")
            .group_by("group")
            .build();
        let err = group_and_name_repositories(&options, &NamingSession::new()).unwrap_err();
        assert!(matches!(err, NamingError::PatternRender { .. }));
    }

    #[test]
    fn missing_table_file_is_an_open_error() {
        let options = GroupingOptions::builder()
            .table_path("/nonexistent/roster.csv")
            .naming_pattern("{{ group }}-project")
            .group_by("group")
            .build();
        let err = group_and_name_repositories(&options, &NamingSession::new()).unwrap_err();
        assert!(matches!(err, NamingError::TableOpen { .. }));
    }

    #[test]
    fn autoincrement_spans_both_strategies_on_one_session() {
        let session = NamingSession::new();
        let explicit = explicit_options("e-{{ autoincrement() }}", &[&["alice"], &["bob"]]);
        let named = name_grouped_repositories(&explicit, &session).unwrap();
        assert_eq!(named.keys().collect::<Vec<_>>(), vec!["e-1", "e-2"]);

        let table = table_file("campusID,group\njohn,B\n");
        let tabular = GroupingOptions::builder()
            .table_path(table.path())
            .naming_pattern("t-{{ autoincrement() }}")
            .group_by("group")
            .build();
        let named = group_and_name_repositories(&tabular, &session).unwrap();
        assert_eq!(named.keys().collect::<Vec<_>>(), vec!["t-3"]);
    }
}
