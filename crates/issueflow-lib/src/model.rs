//! Core data types for issueflow.
//!
//! Field names serialize in camelCase so the persisted document matches
//! `{ users: [...], issues: [...] }` with `authorId`, `createdAt`, etc.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::IssueFlowError;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Open,
    #[serde(alias = "in_progress")]
    InProgress,
    Closed,
}

impl Status {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in-progress",
            Self::Closed => "closed",
        }
    }

    /// Position in the fixed `open < in-progress < closed` order.
    #[must_use]
    pub const fn rank(&self) -> u8 {
        match self {
            Self::Open => 0,
            Self::InProgress => 1,
            Self::Closed => 2,
        }
    }

    #[must_use]
    pub const fn is_closed(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = IssueFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "closed" => Ok(Self::Closed),
            other => Err(IssueFlowError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Member,
}

impl Role {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = IssueFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(IssueFlowError::InvalidRole {
                role: other.to_string(),
            }),
        }
    }
}

/// A selectable user profile. Users come from the seed and are never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Display glyph, usually initials.
    pub avatar: String,
    #[serde(default)]
    pub role: Role,
}

impl User {
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

/// The primary issue entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique ID (e.g., "issue_3f2a...").
    pub id: String,

    pub title: String,

    pub description: String,

    #[serde(default)]
    pub status: Status,

    /// Id of the creating user; may dangle.
    pub author_id: String,

    /// Assigned user ids, no duplicates.
    #[serde(default)]
    pub assignees: Vec<String>,

    /// Lowercase tags in insertion order, no duplicates.
    #[serde(default)]
    pub tags: Vec<String>,

    pub created_at: DateTime<Utc>,

    /// Set while the issue is closed.
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,

    /// Estimated effort in days.
    #[serde(default)]
    pub effort: Option<u32>,
}

impl Default for Issue {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            description: String::new(),
            status: Status::default(),
            author_id: String::new(),
            assignees: Vec::new(),
            tags: Vec::new(),
            created_at: Utc::now(),
            closed_at: None,
            deadline: None,
            effort: None,
        }
    }
}

impl Issue {
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &str) -> bool {
        self.assignees.iter().any(|a| a == user_id)
    }

    #[must_use]
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Effort used for ordering; absent counts as zero.
    #[must_use]
    pub fn effort_or_zero(&self) -> u32 {
        self.effort.unwrap_or(0)
    }
}

/// The persisted unit: every user and issue, rewritten as a whole on each mutation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

impl Document {
    #[must_use]
    pub fn find_issue(&self, id: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.id == id)
    }

    #[must_use]
    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.iter().find(|u| u.id == id)
    }

    #[must_use]
    pub fn contains_issue(&self, id: &str) -> bool {
        self.issues.iter().any(|i| i.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in-progress\""
        );
        let legacy: Status = serde_json::from_str("\"in_progress\"").unwrap();
        assert_eq!(legacy, Status::InProgress);
    }

    #[test]
    fn test_status_from_str() {
        assert_eq!("Open".parse::<Status>().unwrap(), Status::Open);
        assert_eq!("in-progress".parse::<Status>().unwrap(), Status::InProgress);
        assert!(matches!(
            "done".parse::<Status>(),
            Err(IssueFlowError::InvalidStatus { .. })
        ));
    }

    #[test]
    fn test_status_rank_order() {
        assert!(Status::Open.rank() < Status::InProgress.rank());
        assert!(Status::InProgress.rank() < Status::Closed.rank());
    }

    #[test]
    fn test_role_parse() {
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert!("owner".parse::<Role>().is_err());
    }

    #[test]
    fn test_issue_serializes_camel_case_with_nulls() {
        let issue = Issue {
            id: "issue_1".to_string(),
            title: "T".to_string(),
            description: "D".to_string(),
            author_id: "u1".to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
            ..Default::default()
        };
        let value = serde_json::to_value(&issue).unwrap();
        assert_eq!(value["authorId"], "u1");
        assert_eq!(value["status"], "open");
        assert!(value["closedAt"].is_null());
        assert!(value["deadline"].is_null());
        assert!(value["effort"].is_null());
        assert_eq!(value["createdAt"], "2024-01-15T10:30:00Z");
    }

    #[test]
    fn test_issue_reads_missing_optional_fields() {
        let json = r#"{
            "id": "issue_9",
            "title": "Minimal",
            "description": "Only required fields",
            "authorId": "u2",
            "createdAt": "2024-02-01T08:00:00.000Z"
        }"#;
        let issue: Issue = serde_json::from_str(json).unwrap();
        assert_eq!(issue.status, Status::Open);
        assert!(issue.assignees.is_empty());
        assert!(issue.tags.is_empty());
        assert_eq!(issue.effort, None);
    }

    #[test]
    fn test_document_lookup() {
        let doc = Document {
            users: vec![User {
                id: "u1".to_string(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                avatar: "A".to_string(),
                role: Role::Admin,
            }],
            issues: vec![Issue {
                id: "issue_1".to_string(),
                ..Default::default()
            }],
        };
        assert!(doc.find_user("u1").is_some_and(User::is_admin));
        assert!(doc.contains_issue("issue_1"));
        assert!(doc.find_issue("issue_2").is_none());
    }
}
