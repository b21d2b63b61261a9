//! Text formatting functions for `issueflow`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ◐ ✓)
//! - Description previews trimmed to a display width
//! - Effort, date and user name rendering
//! - Issue line and detail formatting

use chrono::{DateTime, Utc};
use issueflow_lib::{Issue, Status, User};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Status icon characters.
pub mod icons {
    /// Open issue - available to work (hollow circle).
    pub const OPEN: &str = "○";
    /// In progress - active work (half-filled).
    pub const IN_PROGRESS: &str = "◐";
    /// Closed - completed (checkmark).
    pub const CLOSED: &str = "✓";
}

/// Display columns kept from a description in list output.
pub const DESCRIPTION_PREVIEW_WIDTH: usize = 120;

const ELLIPSIS: &str = "...";

/// Shown for author or assignee ids that match no user.
pub const UNKNOWN_USER: &str = "unknown";

/// Return the icon character for a status.
#[must_use]
pub const fn format_status_icon(status: Status) -> &'static str {
    match status {
        Status::Open => icons::OPEN,
        Status::InProgress => icons::IN_PROGRESS,
        Status::Closed => icons::CLOSED,
    }
}

/// Cut `text` to at most `max_width` display columns, ending in `...` when
/// anything was removed.
#[must_use]
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }

    let budget = max_width.saturating_sub(ELLIPSIS.len());
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push_str(ELLIPSIS);
    out
}

/// `1 day`, `3 days`, or `Not specified`.
#[must_use]
pub fn format_effort(effort: Option<u32>) -> String {
    match effort {
        Some(1) => "1 day".to_string(),
        Some(days) => format!("{days} days"),
        None => "Not specified".to_string(),
    }
}

/// Dates render like `Jan 15, 2024`.
#[must_use]
pub fn format_date(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y").to_string()
}

/// Name of the user with this id, or `unknown`.
#[must_use]
pub fn user_name<'a>(users: &'a [User], id: &str) -> &'a str {
    users
        .iter()
        .find(|u| u.id == id)
        .map_or(UNKNOWN_USER, |u| u.name.as_str())
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} {title}` followed by `[tag, ...]` when tagged.
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let mut line = format!(
        "{} {} {}",
        format_status_icon(issue.status),
        issue.id,
        issue.title
    );
    if !issue.tags.is_empty() {
        line.push_str(&format!(" [{}]", issue.tags.join(", ")));
    }
    line
}

/// Format the list card: summary line, author and date, description
/// preview, assignees and effort.
#[must_use]
pub fn format_issue_card(issue: &Issue, users: &[User]) -> String {
    let mut lines = vec![
        format_issue_line(issue),
        format!(
            "    by {} on {}",
            user_name(users, &issue.author_id),
            format_date(&issue.created_at)
        ),
        format!(
            "    {}",
            truncate(&issue.description, DESCRIPTION_PREVIEW_WIDTH)
        ),
    ];

    let assignees = known_assignees(issue, users);
    if !assignees.is_empty() {
        lines.push(format!("    Assigned to: {}", assignees.join(", ")));
    }
    if let Some(effort) = issue.effort {
        lines.push(format!("    Effort: {}", format_effort(Some(effort))));
    }
    lines.join("\n")
}

/// Format the full detail view for `show`.
#[must_use]
pub fn format_issue_details(issue: &Issue, users: &[User]) -> String {
    let mut lines = vec![
        format!("{} {}", format_status_icon(issue.status), issue.title),
        format!("ID:        {}", issue.id),
        format!("Status:    {}", issue.status),
        format!("Author:    {}", user_name(users, &issue.author_id)),
        format!("Created:   {}", format_date(&issue.created_at)),
    ];
    if let Some(closed_at) = &issue.closed_at {
        lines.push(format!("Closed:    {}", format_date(closed_at)));
    }

    let assignees: Vec<&str> = issue
        .assignees
        .iter()
        .map(|id| user_name(users, id))
        .collect();
    if assignees.is_empty() {
        lines.push("Assignees: No assignees".to_string());
    } else {
        lines.push(format!("Assignees: {}", assignees.join(", ")));
    }

    if !issue.tags.is_empty() {
        lines.push(format!("Tags:      {}", issue.tags.join(", ")));
    }
    let deadline = issue
        .deadline
        .as_ref()
        .map_or_else(|| "Not set".to_string(), format_date);
    lines.push(format!("Deadline:  {deadline}"));
    lines.push(format!("Effort:    {}", format_effort(issue.effort)));

    lines.push(String::new());
    lines.push(issue.description.clone());
    lines.join("\n")
}

/// Cards only list assignees that resolve to a user.
fn known_assignees<'a>(issue: &Issue, users: &'a [User]) -> Vec<&'a str> {
    issue
        .assignees
        .iter()
        .filter_map(|id| users.iter().find(|u| &u.id == id))
        .map(|u| u.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use issueflow_lib::Role;
    use proptest::prelude::*;

    fn make_test_issue() -> Issue {
        Issue {
            id: "issue_1".to_string(),
            title: "Test title".to_string(),
            description: "Short description".to_string(),
            author_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            ..Default::default()
        }
    }

    fn users() -> Vec<User> {
        vec![User {
            id: "u1".to_string(),
            name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            avatar: "AJ".to_string(),
            role: Role::Admin,
        }]
    }

    #[test]
    fn test_status_icons() {
        assert_eq!(format_status_icon(Status::Open), "○");
        assert_eq!(format_status_icon(Status::InProgress), "◐");
        assert_eq!(format_status_icon(Status::Closed), "✓");
    }

    #[test]
    fn test_format_issue_line_open() {
        let issue = make_test_issue();
        assert_eq!(format_issue_line(&issue), "○ issue_1 Test title");
    }

    #[test]
    fn test_format_issue_line_with_tags() {
        let mut issue = make_test_issue();
        issue.status = Status::Closed;
        issue.tags = vec!["bug".to_string(), "ui".to_string()];
        assert_eq!(format_issue_line(&issue), "✓ issue_1 Test title [bug, ui]");
    }

    #[test]
    fn test_truncate_short_text_unchanged() {
        assert_eq!(truncate("hello", 120), "hello");
    }

    #[test]
    fn test_truncate_long_text() {
        let text = "a".repeat(130);
        let cut = truncate(&text, 120);
        assert_eq!(cut.len(), 120);
        assert!(cut.ends_with("..."));
    }

    #[test]
    fn test_truncate_wide_chars() {
        let cut = truncate("日本語のテキスト", 9);
        assert_eq!(cut, "日本語...");
    }

    #[test]
    fn test_format_effort() {
        assert_eq!(format_effort(Some(1)), "1 day");
        assert_eq!(format_effort(Some(5)), "5 days");
        assert_eq!(format_effort(None), "Not specified");
    }

    #[test]
    fn test_format_date() {
        let issue = make_test_issue();
        assert_eq!(format_date(&issue.created_at), "Jan 15, 2024");
    }

    #[test]
    fn test_unknown_user() {
        assert_eq!(user_name(&users(), "u1"), "Alice Johnson");
        assert_eq!(user_name(&users(), "ghost"), "unknown");
    }

    #[test]
    fn test_card_skips_unknown_assignees() {
        let mut issue = make_test_issue();
        issue.assignees = vec!["u1".to_string(), "ghost".to_string()];
        issue.effort = Some(2);
        let card = format_issue_card(&issue, &users());
        assert!(card.contains("by Alice Johnson on Jan 15, 2024"));
        assert!(card.contains("Assigned to: Alice Johnson\n"));
        assert!(card.ends_with("Effort: 2 days"));
    }

    #[test]
    fn test_card_layout() {
        let issue = make_test_issue();
        assert_eq!(
            format_issue_card(&issue, &users()),
            "○ issue_1 Test title\n    by Alice Johnson on Jan 15, 2024\n    Short description"
        );
    }

    #[test]
    fn test_details_layout_with_closed_and_tags() {
        let mut issue = make_test_issue();
        issue.status = Status::Closed;
        issue.closed_at = Some(Utc.with_ymd_and_hms(2024, 2, 1, 9, 0, 0).unwrap());
        issue.tags = vec!["bug".to_string()];
        issue.assignees = vec!["u1".to_string()];
        let details = format_issue_details(&issue, &users());
        assert!(details.starts_with("✓ Test title\nID:        issue_1\n"));
        assert!(details.contains("\nClosed:    Feb 1, 2024\n"));
        assert!(details.contains("\nAssignees: Alice Johnson\nTags:      bug\n"));
        assert!(details.ends_with("Effort:    Not specified\n\nShort description"));
    }

    #[test]
    fn test_details_show_unknown_author() {
        let mut issue = make_test_issue();
        issue.author_id = "ghost".to_string();
        let details = format_issue_details(&issue, &users());
        assert!(details.contains("Author:    unknown"));
        assert!(details.contains("Assignees: No assignees"));
        assert!(details.contains("Deadline:  Not set"));
        assert!(details.contains("Effort:    Not specified"));
        assert!(details.ends_with("Short description"));
    }

    proptest! {
        #[test]
        fn prop_truncate_fits_width(text in "[a-zA-Z0-9 .,日本語テキスト]{0,200}", width in 3usize..200) {
            let cut = truncate(&text, width);
            prop_assert!(cut.width() <= width);
        }
    }
}
