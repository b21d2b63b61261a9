//! Validation helpers for issueflow.
//!
//! These routines enforce required-field constraints and return
//! structured validation errors without touching storage.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

use crate::error::{IssueFlowError, Result, ValidationError};
use crate::model::{Document, Status};
use crate::query::{IssueDraft, IssuePatch};
use crate::util::parse_deadline;

/// Validates issue input before it reaches the repository.
pub struct IssueValidator;

impl IssueValidator {
    /// Validate a draft and return its parsed deadline.
    ///
    /// # Errors
    ///
    /// Returns `Validation` (or `ValidationErrors` when several fields fail)
    /// for a blank title or description, a zero effort, or a malformed
    /// deadline.
    pub fn validate_draft(draft: &IssueDraft) -> Result<Option<DateTime<Utc>>> {
        let mut errors = Vec::new();

        check_title(&draft.title, &mut errors);
        check_description(&draft.description, &mut errors);
        check_effort(draft.effort, &mut errors);

        if draft.author_id.trim().is_empty() {
            errors.push(ValidationError::new("authorId", "cannot be empty"));
        }

        let deadline = match draft.deadline.as_deref().map(parse_deadline) {
            None => None,
            Some(Ok(deadline)) => deadline,
            Some(Err(input)) => {
                errors.push(ValidationError::new(
                    "deadline",
                    format!("'{input}' is not a date (expected YYYY-MM-DD)"),
                ));
                None
            }
        };

        if errors.is_empty() {
            Ok(deadline)
        } else {
            Err(IssueFlowError::from_validation_errors(errors))
        }
    }

    /// Validate the fields present in a patch.
    ///
    /// # Errors
    ///
    /// Returns `Validation`/`ValidationErrors` for a blank title or
    /// description or a zero effort.
    pub fn validate_patch(patch: &IssuePatch) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(title) = &patch.title {
            check_title(title, &mut errors);
        }
        if let Some(description) = &patch.description {
            check_description(description, &mut errors);
        }
        if let Some(effort) = patch.effort {
            check_effort(effort, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(IssueFlowError::from_validation_errors(errors))
        }
    }
}

fn check_title(title: &str, errors: &mut Vec<ValidationError>) {
    if title.trim().is_empty() {
        errors.push(ValidationError::new("title", "cannot be empty"));
    }
}

fn check_description(description: &str, errors: &mut Vec<ValidationError>) {
    if description.trim().is_empty() {
        errors.push(ValidationError::new("description", "cannot be empty"));
    }
}

fn check_effort(effort: Option<u32>, errors: &mut Vec<ValidationError>) {
    if effort == Some(0) {
        errors.push(ValidationError::new(
            "effort",
            "must be a positive number of days",
        ));
    }
}

// ============================================================================
// Document audit
// ============================================================================

/// One integrity problem found in a stored document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// Issue the finding is about.
    pub issue_id: String,
    /// Short machine-readable kind, e.g. `dangling-author`.
    pub kind: &'static str,
    pub message: String,
}

impl Finding {
    fn new(issue_id: &str, kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            issue_id: issue_id.to_string(),
            kind,
            message: message.into(),
        }
    }
}

/// Check a document for data the repository would never write.
///
/// Dangling user references are reported even though they are tolerated
/// at display time.
#[must_use]
pub fn audit(document: &Document) -> Vec<Finding> {
    let user_ids: HashSet<&str> = document.users.iter().map(|u| u.id.as_str()).collect();
    let mut seen_ids: HashSet<&str> = HashSet::new();
    let mut findings = Vec::new();

    for issue in &document.issues {
        let id = issue.id.as_str();

        if !seen_ids.insert(id) {
            findings.push(Finding::new(id, "duplicate-id", "issue id appears more than once"));
        }

        if !user_ids.contains(issue.author_id.as_str()) {
            findings.push(Finding::new(
                id,
                "dangling-author",
                format!("author '{}' is not a known user", issue.author_id),
            ));
        }

        for assignee in &issue.assignees {
            if !user_ids.contains(assignee.as_str()) {
                findings.push(Finding::new(
                    id,
                    "dangling-assignee",
                    format!("assignee '{assignee}' is not a known user"),
                ));
            }
        }

        let mut seen_tags: HashSet<String> = HashSet::new();
        for tag in &issue.tags {
            if *tag != tag.to_lowercase() {
                findings.push(Finding::new(
                    id,
                    "tag-case",
                    format!("tag '{tag}' is not lowercase"),
                ));
            }
            if !seen_tags.insert(tag.to_lowercase()) {
                findings.push(Finding::new(
                    id,
                    "duplicate-tag",
                    format!("tag '{tag}' appears more than once"),
                ));
            }
        }

        if issue.effort == Some(0) {
            findings.push(Finding::new(id, "effort", "effort must be positive"));
        }

        match (issue.status, issue.closed_at) {
            (Status::Closed, None) => {
                findings.push(Finding::new(id, "closed-at", "closed issue has no closedAt"));
            }
            (Status::Open | Status::InProgress, Some(_)) => {
                findings.push(Finding::new(
                    id,
                    "closed-at",
                    format!("{} issue has a closedAt timestamp", issue.status),
                ));
            }
            _ => {}
        }
    }

    findings
}
