//! List command implementation.
//!
//! Applies the view model (filter, tag set, single sort key) for the
//! logged-in user and prints cards or an `IssueList` JSON object.

use anyhow::Result;
use issueflow_lib::{ViewOptions, derive_view};

use super::CommandContext;
use crate::cli::ListArgs;
use crate::format::{IssueList, IssueWithNames, format_issue_card};

/// Execute the list command.
///
/// # Errors
///
/// Returns `NotAuthenticated` when nobody is logged in, or an error if the
/// store cannot be read.
pub fn execute(args: &ListArgs, ctx: &CommandContext) -> Result<()> {
    let user = ctx.current_user()?;
    let document = ctx.repo().document()?;

    let options = build_options(args, ctx, &user.id);
    let view = derive_view(&document.issues, &options);
    tracing::debug!(
        total = document.issues.len(),
        shown = view.len(),
        sort = %options.sort,
        "Derived issue view"
    );

    if ctx.json {
        let output = IssueList {
            filter: options.filter.map(|f| f.as_str().to_string()),
            tags: options.tags.iter().cloned().collect(),
            sort: options.sort.as_str().to_string(),
            count: view.len(),
            issues: view
                .into_iter()
                .map(|issue| IssueWithNames::resolve(issue.clone(), &document.users))
                .collect(),
        };
        return ctx.print_json(&output);
    }

    if view.is_empty() {
        println!("No issues found.");
        return Ok(());
    }
    for issue in &view {
        println!("{}\n", format_issue_card(issue, &document.users));
    }
    println!("{} issue(s)", view.len());
    Ok(())
}

/// Convert CLI args to view options. Tags are matched lowercased.
fn build_options(args: &ListArgs, ctx: &CommandContext, user_id: &str) -> ViewOptions {
    ViewOptions {
        filter: args.filter,
        tags: args
            .tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect(),
        sort: args.sort.unwrap_or(ctx.config.default_sort),
        current_user_id: Some(user_id.to_string()),
    }
}
