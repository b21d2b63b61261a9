//! Delete command implementation.

use anyhow::Result;
use issueflow_lib::session::authorize_delete;
use serde::Serialize;

use super::CommandContext;

#[derive(Serialize)]
struct DeleteOutput<'a> {
    deleted: &'a str,
}

/// Execute the delete command. Authors and admins may delete.
///
/// # Errors
///
/// Returns `NotAuthenticated`, `IssueNotFound`, `PermissionDenied`, or a
/// persistence error.
pub fn execute(id: &str, ctx: &CommandContext) -> Result<()> {
    let user = ctx.current_user()?;
    let issue = ctx.repo().get_issue(id)?;
    authorize_delete(&user, &issue)?;

    let removed = ctx.repo().delete_issue(id)?;
    tracing::info!(id = %removed.id, by = %user.id, "Deleted issue");

    if ctx.json {
        return ctx.print_json(&DeleteOutput {
            deleted: &removed.id,
        });
    }
    println!("Deleted {}: {}", removed.id, removed.title);
    Ok(())
}
