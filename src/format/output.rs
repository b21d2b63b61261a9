use issueflow_lib::{Issue, User};
use serde::Serialize;

use super::text::user_name;

/// Issue with resolved user names for list/show views.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueWithNames {
    #[serde(flatten)]
    pub issue: Issue,
    pub author_name: String,
    /// Parallel to `issue.assignees`; unknown ids resolve to `unknown`.
    pub assignee_names: Vec<String>,
}

impl IssueWithNames {
    #[must_use]
    pub fn resolve(issue: Issue, users: &[User]) -> Self {
        let author_name = user_name(users, &issue.author_id).to_string();
        let assignee_names = issue
            .assignees
            .iter()
            .map(|id| user_name(users, id).to_string())
            .collect();
        Self {
            issue,
            author_name,
            assignee_names,
        }
    }
}

/// User row for `users`, flagged when it is the current session user.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntry<'a> {
    #[serde(flatten)]
    pub user: &'a User,
    pub current: bool,
}

/// Output of `list`: the applied view options and the resulting issues.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueList {
    pub filter: Option<String>,
    pub tags: Vec<String>,
    pub sort: String,
    pub count: usize,
    pub issues: Vec<IssueWithNames>,
}
