mod common;
use common::cli::{IflowWorkspace, run_ok};
use std::fs;

fn ids(list: &serde_json::Value) -> Vec<String> {
    list["issues"]
        .as_array()
        .expect("issues array")
        .iter()
        .map(|issue| issue["id"].as_str().expect("id").to_string())
        .collect()
}

#[test]
fn test_default_list_is_newest_first() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");
    let list = run_ok(&workspace, ["list", "--json"], "list").json();
    assert_eq!(list["sort"], "created-desc");
    assert_eq!(
        ids(&list),
        ["issue_6", "issue_5", "issue_4", "issue_3", "issue_2", "issue_1"]
    );
}

#[test]
fn test_tag_filter_matches_any_tag() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");

    let list = run_ok(&workspace, ["list", "--tag", "bug", "--json"], "bug").json();
    assert_eq!(ids(&list), ["issue_5", "issue_2"]);

    let list = run_ok(
        &workspace,
        ["list", "--tag", "BUG", "--tag", "documentation", "--json"],
        "bug or docs",
    )
    .json();
    assert_eq!(ids(&list), ["issue_5", "issue_4", "issue_2"]);
}

#[test]
fn test_assigned_and_created_filters() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u2"], "login");

    let assigned = run_ok(&workspace, ["list", "--filter", "assigned", "--json"], "assigned").json();
    assert_eq!(ids(&assigned), ["issue_5", "issue_2"]);

    let created = run_ok(&workspace, ["list", "--filter", "created", "--json"], "created").json();
    assert_eq!(ids(&created), ["issue_4", "issue_2"]);
}

#[test]
fn test_sort_keys() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");

    let by_effort = run_ok(&workspace, ["list", "--sort", "effort-desc", "--json"], "effort").json();
    assert_eq!(
        ids(&by_effort),
        ["issue_1", "issue_3", "issue_2", "issue_5", "issue_4", "issue_6"]
    );

    let by_status = run_ok(&workspace, ["list", "--sort", "status", "--json"], "status").json();
    assert_eq!(
        ids(&by_status),
        ["issue_6", "issue_3", "issue_2", "issue_5", "issue_1", "issue_4"]
    );

    let by_title = run_ok(&workspace, ["list", "--sort", "title-asc", "--json"], "title").json();
    assert_eq!(
        ids(&by_title),
        ["issue_6", "issue_4", "issue_3", "issue_2", "issue_5", "issue_1"]
    );
}

#[test]
fn test_default_sort_from_config_file() {
    let workspace = IflowWorkspace::new();
    fs::create_dir_all(workspace.data_dir()).unwrap();
    fs::write(
        workspace.data_dir().join("config.yaml"),
        "default_sort: created-asc\n",
    )
    .unwrap();

    run_ok(&workspace, ["login", "u1"], "login");
    let list = run_ok(&workspace, ["list", "--json"], "list").json();
    assert_eq!(list["sort"], "created-asc");
    assert_eq!(ids(&list)[0], "issue_1");
}

#[test]
fn test_text_list_shows_cards() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");
    let out = run_ok(&workspace, ["list", "--tag", "security"], "list");
    assert!(out.stdout.contains("◐ issue_5 Session token not cleared on logout"));
    assert!(out.stdout.contains("by Alice Johnson on Feb 5, 2024"));
    assert!(out.stdout.contains("Assigned to: Bob Smith"));
    assert!(out.stdout.contains("Effort: 2 days"));
    assert!(out.stdout.contains("1 issue(s)"));
}

#[test]
fn test_tags_vocabulary() {
    let workspace = IflowWorkspace::new();
    let tags = run_ok(&workspace, ["tags", "--json"], "tags").json();
    assert_eq!(
        tags,
        serde_json::json!([
            "backend",
            "bug",
            "critical",
            "documentation",
            "enhancement",
            "frontend",
            "high-priority",
            "mobile",
            "performance",
            "security",
            "testing",
            "ui"
        ])
    );
}

#[test]
fn test_predefined_tags() {
    let workspace = IflowWorkspace::new();
    let out = run_ok(&workspace, ["tags", "--predefined"], "predefined");
    let tags: Vec<&str> = out.stdout.lines().collect();
    assert_eq!(tags.len(), 12);
    assert_eq!(tags[0], "bug");
}
