//! End-to-end tests of the grouping and naming pipeline, from a loaded
//! repository configuration through to the final group map.

use repodist::config::RepositoryConfigFile;
use repodist::naming::{
    clean_project_name, group_and_name_repositories, name_grouped_repositories,
    GroupingOptions, NamingSession,
};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn explicit_groups_flow_from_config_to_named_repositories() {
    let config_file = write_file(
        r#"{
            "repository": {
                "repositoryName": "group-{{ usernames.0 }}-{{ usernames.1 }}",
                "repositoryMembers": [["alice", "bob"], ["charlie", "dave"]]
            }
        }"#,
    );
    let config = RepositoryConfigFile::load(config_file.path()).await.unwrap();

    let options = GroupingOptions::builder()
        .naming_pattern(config.content.repository.repository_name.as_str())
        .groups(config.content.repository.repository_members.clone())
        .build();
    let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();

    assert_eq!(
        named.keys().collect::<Vec<_>>(),
        vec!["group-alice-bob", "group-charlie-dave"]
    );
    for group in named.values() {
        assert_eq!(group.records.len(), 2);
        assert_eq!(group.records[0].keys().collect::<Vec<_>>(), vec!["username"]);
    }
}

#[test]
fn roster_table_produces_one_entry_per_group_value() {
    let roster = write_file(
        "campusID,group,email\n\
         alice,A,alice@example.org\n\
         bob,A,bob@example.org\n\
         john,B,john@example.org\n",
    );

    let options = GroupingOptions::builder()
        .table_path(roster.path())
        .naming_pattern("{{ group }}-project")
        .group_by("group")
        .build();
    let named = group_and_name_repositories(&options, &NamingSession::new()).unwrap();

    assert_eq!(named.len(), 2);
    assert_eq!(named["A-project"].records.len(), 2);
    assert_eq!(named["B-project"].records.len(), 1);
    assert_eq!(named["B-project"].records[0]["campusID"], "john");
    assert_eq!(named["B-project"].name, "B-project");
}

#[test]
fn rendered_names_pass_through_the_sanitizer() {
    let options = GroupingOptions::builder()
        .naming_pattern("Übung {{ usernames.0 }} (WS)")
        .groups(vec![vec!["jörg".to_string()]])
        .build();
    let named = name_grouped_repositories(&options, &NamingSession::new()).unwrap();

    let group = &named["Übung jörg (WS)"];
    assert_eq!(group.name, "Uebung-joerg-WS");
    // Sanitization is idempotent.
    assert_eq!(clean_project_name(&group.name), group.name);
}

#[test]
fn stateful_functions_share_one_session_across_strategies() {
    let session = NamingSession::new();

    let explicit = GroupingOptions::builder()
        .naming_pattern("{{ usernames.0 }}-{{ autoincrement() }}")
        .groups(vec![vec!["alice".to_string()], vec!["bob".to_string()]])
        .build();
    let first = name_grouped_repositories(&explicit, &session).unwrap();
    assert_eq!(first.keys().collect::<Vec<_>>(), vec!["alice-1", "bob-2"]);

    let roster = write_file("campusID,group\njohn,B\n");
    let tabular = GroupingOptions::builder()
        .table_path(roster.path())
        .naming_pattern("{{ campusID }}-{{ autoincrement() }}")
        .group_by("group")
        .build();
    let second = group_and_name_repositories(&tabular, &session).unwrap();
    assert_eq!(second.keys().collect::<Vec<_>>(), vec!["john-3"]);
}

#[test]
fn failing_render_returns_no_partial_result() {
    // The second group trips the undefined variable, so not even the
    // first group's entry may surface.
    let options = GroupingOptions::builder()
        .naming_pattern("{{ usernames.1 }}-pair")
        .groups(vec![
            vec!["alice".to_string(), "bob".to_string()],
            vec!["solo".to_string()],
        ])
        .build();
    assert!(name_grouped_repositories(&options, &NamingSession::new()).is_err());
}
