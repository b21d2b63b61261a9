//! Show command implementation.

use anyhow::Result;

use super::CommandContext;
use crate::format::{IssueWithNames, format_issue_details};

/// Execute the show command.
///
/// # Errors
///
/// Returns `NotAuthenticated` or `IssueNotFound`.
pub fn execute(id: &str, ctx: &CommandContext) -> Result<()> {
    ctx.current_user()?;
    let document = ctx.repo().document()?;
    let issue = document
        .find_issue(id)
        .cloned()
        .ok_or_else(|| issueflow_lib::IssueFlowError::IssueNotFound { id: id.to_string() })?;

    if ctx.json {
        return ctx.print_json(&IssueWithNames::resolve(issue, &document.users));
    }
    println!("{}", format_issue_details(&issue, &document.users));
    Ok(())
}
