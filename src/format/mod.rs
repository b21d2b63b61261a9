//! Output formatting for `issueflow`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//!
//! # JSON Output Types
//!
//! - [`IssueWithNames`] - Issue with author/assignee names (list/show)
//! - [`IssueList`] - Applied view options plus issues (list)
//! - [`UserEntry`] - User with a current-session flag (users)

mod output;
mod text;

pub use output::{IssueList, IssueWithNames, UserEntry};
pub use text::{
    DESCRIPTION_PREVIEW_WIDTH, UNKNOWN_USER, format_date, format_effort, format_issue_card,
    format_issue_details, format_issue_line, format_status_icon, icons, truncate, user_name,
};
