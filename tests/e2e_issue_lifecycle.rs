mod common;
use common::cli::{IflowWorkspace, run_iflow, run_ok};
use predicates::prelude::*;

#[test]
fn test_create_update_close_reopen() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u2"], "login member");

    let created = run_ok(
        &workspace,
        [
            "create",
            "--title",
            "Crash on save",
            "--description",
            "Saving an issue with an emoji title crashes",
            "--tag",
            "Bug",
            "--tag",
            "bug",
            "--assignee",
            "u3",
            "--effort",
            "2",
            "--json",
        ],
        "create",
    )
    .json();
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["status"], "open");
    assert_eq!(created["authorId"], "u2");
    assert_eq!(created["tags"], serde_json::json!(["bug"]));
    assert_eq!(created["assigneeNames"], serde_json::json!(["Carol Davis"]));
    assert!(created["closedAt"].is_null());

    let list = run_ok(&workspace, ["list", "--json"], "list").json();
    assert_eq!(list["count"], 7);
    assert_eq!(list["issues"][0]["id"], id.as_str());

    let updated = run_ok(
        &workspace,
        ["update", id.as_str(), "--status", "in-progress", "--clear-effort", "--json"],
        "update",
    )
    .json();
    assert_eq!(updated["status"], "in-progress");
    assert!(updated["effort"].is_null());
    assert_eq!(updated["title"], "Crash on save");

    let denied = run_iflow(&workspace, ["close", id.as_str()], "member close");
    assert!(!denied.status.success());
    assert!(denied.stderr.contains("Permission denied"));

    run_ok(&workspace, ["login", "u1"], "login admin");
    let closed = run_ok(&workspace, ["close", id.as_str(), "--json"], "close").json();
    assert_eq!(closed["status"], "closed");
    assert!(closed["closedAt"].is_string());

    let reopened = run_ok(&workspace, ["reopen", id.as_str(), "--json"], "reopen").json();
    assert_eq!(reopened["status"], "open");
    assert!(reopened["closedAt"].is_null());
}

#[test]
fn test_only_author_can_edit() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u2"], "login");

    // issue_3 was written by u4.
    let out = run_iflow(&workspace, ["update", "issue_3", "--title", "Mine now"], "update");
    assert!(!out.status.success());
    assert!(out.stderr.contains("cannot edit issue_3"));

    run_ok(
        &workspace,
        ["update", "issue_2", "--title", "Mobile layout overlaps sidebar"],
        "author update",
    );
    workspace
        .command()
        .args(["show", "issue_2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mobile layout overlaps sidebar"));
}

#[test]
fn test_member_cannot_close_through_update() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u2"], "login");
    let out = run_iflow(&workspace, ["update", "issue_2", "--status", "closed"], "update");
    assert!(!out.status.success());
    assert!(out.stderr.contains("cannot close issue_2"));
}

#[test]
fn test_closed_issue_is_not_editable() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u2"], "login");
    // issue_4 is closed and authored by u2.
    let out = run_iflow(&workspace, ["update", "issue_4", "--title", "Again"], "update");
    assert!(!out.status.success());
}

#[test]
fn test_update_missing_issue_fails() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");
    workspace
        .command()
        .args(["update", "missing-id", "--title", "x"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Issue not found: missing-id"));
}

#[test]
fn test_create_validation_errors() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u1"], "login");
    workspace
        .command()
        .args(["create", "--title", " ", "--description", "d", "--effort", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title").and(predicate::str::contains("effort")));

    let list = run_ok(&workspace, ["list", "--json"], "list").json();
    assert_eq!(list["count"], 6);
}

#[test]
fn test_delete_by_author() {
    let workspace = IflowWorkspace::new();
    run_ok(&workspace, ["login", "u3"], "login");

    let out = run_iflow(&workspace, ["delete", "issue_1"], "delete other");
    assert!(!out.status.success());

    run_ok(&workspace, ["delete", "issue_6"], "delete own");
    workspace
        .command()
        .args(["show", "issue_6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Issue not found"));
}
