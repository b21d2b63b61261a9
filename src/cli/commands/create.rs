//! Create command implementation.

use anyhow::Result;
use issueflow_lib::IssueDraft;

use super::CommandContext;
use crate::cli::CreateArgs;
use crate::format::{IssueWithNames, format_issue_line};

/// Execute the create command. The logged-in user becomes the author.
///
/// # Errors
///
/// Returns `NotAuthenticated`, a validation error, or a persistence error.
pub fn execute(args: CreateArgs, ctx: &CommandContext) -> Result<()> {
    let author = ctx.current_user()?;

    let draft = IssueDraft {
        title: args.title,
        description: args.description,
        author_id: author.id,
        assignees: args.assignees,
        tags: args.tags,
        deadline: args.deadline,
        effort: args.effort,
    };
    let issue = ctx.repo().create_issue(&draft)?;
    tracing::info!(id = %issue.id, "Created issue");

    if ctx.json {
        let users = ctx.repo().list_users()?;
        return ctx.print_json(&IssueWithNames::resolve(issue, &users));
    }
    println!("Created {}", format_issue_line(&issue));
    Ok(())
}
