//! Update command implementation.

use anyhow::{Result, bail};
use issueflow_lib::session::authorize_update;
use issueflow_lib::util::parse_deadline;
use issueflow_lib::{IssueFlowError, IssuePatch};

use super::CommandContext;
use crate::cli::UpdateArgs;
use crate::format::{IssueWithNames, format_issue_line};

/// Execute the update command.
///
/// Only the author may edit, and only while the issue is open or in
/// progress. Setting `--status closed` also needs an admin.
///
/// # Errors
///
/// Returns `NotAuthenticated`, `IssueNotFound`, `PermissionDenied`, a
/// validation error, or a persistence error.
pub fn execute(args: UpdateArgs, ctx: &CommandContext) -> Result<()> {
    let user = ctx.current_user()?;
    let issue = ctx.repo().get_issue(&args.id)?;

    let id = args.id.clone();
    let patch = build_patch(args)?;
    if patch.is_empty() {
        bail!("nothing to update; pass at least one field flag");
    }

    authorize_update(&user, &issue, &patch)?;
    let updated = ctx.repo().update_issue(&id, &patch)?;
    tracing::info!(id = %updated.id, "Updated issue");

    if ctx.json {
        let users = ctx.repo().list_users()?;
        return ctx.print_json(&IssueWithNames::resolve(updated, &users));
    }
    println!("Updated {}", format_issue_line(&updated));
    Ok(())
}

/// Convert CLI flags to a patch. `--clear-*` flags become explicit nulls or
/// empty lists.
fn build_patch(args: UpdateArgs) -> Result<IssuePatch, IssueFlowError> {
    let deadline = if args.clear_deadline {
        Some(None)
    } else {
        args.deadline
            .as_deref()
            .map(|input| {
                parse_deadline(input).map_err(|input| {
                    IssueFlowError::validation(
                        "deadline",
                        format!("'{input}' is not a date (expected YYYY-MM-DD)"),
                    )
                })
            })
            .transpose()?
    };

    let effort = if args.clear_effort {
        Some(None)
    } else {
        args.effort.map(Some)
    };

    let assignees = if args.clear_assignees {
        Some(Vec::new())
    } else if args.assignees.is_empty() {
        None
    } else {
        Some(args.assignees)
    };

    let tags = if args.clear_tags {
        Some(Vec::new())
    } else if args.tags.is_empty() {
        None
    } else {
        Some(args.tags)
    };

    Ok(IssuePatch {
        title: args.title,
        description: args.description,
        status: args.status,
        assignees,
        tags,
        deadline,
        effort,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args() -> UpdateArgs {
        UpdateArgs {
            id: "issue_1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_no_flags_is_empty_patch() {
        assert!(build_patch(args()).unwrap().is_empty());
    }

    #[test]
    fn test_clear_flags_become_nulls() {
        let patch = build_patch(UpdateArgs {
            clear_deadline: true,
            clear_effort: true,
            clear_tags: true,
            ..args()
        })
        .unwrap();
        assert_eq!(patch.deadline, Some(None));
        assert_eq!(patch.effort, Some(None));
        assert_eq!(patch.tags, Some(Vec::new()));
        assert_eq!(patch.assignees, None);
    }

    #[test]
    fn test_deadline_parsed() {
        let patch = build_patch(UpdateArgs {
            deadline: Some("2024-12-31".to_string()),
            effort: Some(4),
            ..args()
        })
        .unwrap();
        assert_eq!(
            patch.deadline.flatten().unwrap().to_rfc3339(),
            "2024-12-31T00:00:00+00:00"
        );
        assert_eq!(patch.effort, Some(Some(4)));
    }

    #[test]
    fn test_bad_deadline_rejected() {
        let err = build_patch(UpdateArgs {
            deadline: Some("next week".to_string()),
            ..args()
        })
        .unwrap_err();
        assert!(matches!(err, IssueFlowError::Validation { .. }));
    }
}
