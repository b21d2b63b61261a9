//! Close and reopen commands. Both are admin-only.

use anyhow::Result;
use issueflow_lib::Issue;
use issueflow_lib::session::authorize_close;

use super::CommandContext;
use crate::format::{IssueWithNames, format_issue_line};

/// # Errors
///
/// Returns `NotAuthenticated`, `PermissionDenied`, `IssueNotFound`, or a
/// persistence error.
pub fn close(id: &str, ctx: &CommandContext) -> Result<()> {
    let user = ctx.current_user()?;
    authorize_close(&user, id)?;
    let issue = ctx.repo().close_issue(id)?;
    tracing::info!(id = %issue.id, by = %user.id, "Closed issue");
    report("Closed", issue, ctx)
}

/// # Errors
///
/// Returns `NotAuthenticated`, `PermissionDenied`, `IssueNotFound`, or a
/// persistence error.
pub fn reopen(id: &str, ctx: &CommandContext) -> Result<()> {
    let user = ctx.current_user()?;
    authorize_close(&user, id)?;
    let issue = ctx.repo().reopen_issue(id)?;
    tracing::info!(id = %issue.id, by = %user.id, "Reopened issue");
    report("Reopened", issue, ctx)
}

fn report(verb: &str, issue: Issue, ctx: &CommandContext) -> Result<()> {
    if ctx.json {
        let users = ctx.repo().list_users()?;
        return ctx.print_json(&IssueWithNames::resolve(issue, &users));
    }
    println!("{verb} {}", format_issue_line(&issue));
    Ok(())
}
