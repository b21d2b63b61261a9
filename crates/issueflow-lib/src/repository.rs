//! Issue CRUD over a [`Store`].
//!
//! Every operation loads the whole document, mutates a copy in memory and
//! saves it back. A failed validation or write leaves storage untouched.

use chrono::Utc;

use crate::error::{IssueFlowError, Result};
use crate::model::{Document, Issue, Status, User};
use crate::query::{IssueDraft, IssuePatch};
use crate::store::Store;
use crate::util::{IdGenerator, UuidIdGenerator, dedupe_ids, normalize_tags};
use crate::validation::IssueValidator;

/// Candidate ids tried before `create_issue` gives up with `IdCollision`.
pub const MAX_ID_ATTEMPTS: usize = 16;

/// Issue repository backed by a whole-document store.
pub struct IssueRepository<S: Store> {
    store: S,
    ids: Box<dyn IdGenerator>,
}

impl<S: Store> IssueRepository<S> {
    /// A repository that assigns random UUID-based ids.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self::with_id_generator(store, UuidIdGenerator::new())
    }

    #[must_use]
    pub fn with_id_generator(store: S, ids: impl IdGenerator + 'static) -> Self {
        Self {
            store,
            ids: Box::new(ids),
        }
    }

    /// Load the full document.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if storage cannot be read or seeded.
    pub fn document(&self) -> Result<Document> {
        self.store.load()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All issues in stored order, newest first.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if storage cannot be read or seeded.
    pub fn list_issues(&self) -> Result<Vec<Issue>> {
        Ok(self.store.load()?.issues)
    }

    /// # Errors
    ///
    /// Returns `IssueNotFound` if no issue has this id.
    pub fn get_issue(&self, id: &str) -> Result<Issue> {
        self.store
            .load()?
            .find_issue(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// # Errors
    ///
    /// Returns `Persistence` if storage cannot be read or seeded.
    pub fn list_users(&self) -> Result<Vec<User>> {
        Ok(self.store.load()?.users)
    }

    /// # Errors
    ///
    /// Returns `UserNotFound` if no user has this id.
    pub fn get_user(&self, id: &str) -> Result<User> {
        self.store
            .load()?
            .find_user(id)
            .cloned()
            .ok_or_else(|| IssueFlowError::UserNotFound { id: id.to_string() })
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Create an issue from a draft and store it first in the list.
    ///
    /// The new issue is `open`, has no `closedAt`, and carries normalized
    /// tags and deduplicated assignees.
    ///
    /// # Errors
    ///
    /// Returns `Validation`/`ValidationErrors` for a bad draft,
    /// `IdCollision` if no unused id turns up after [`MAX_ID_ATTEMPTS`],
    /// or `Persistence` if the write fails.
    pub fn create_issue(&self, draft: &IssueDraft) -> Result<Issue> {
        let deadline = IssueValidator::validate_draft(draft)?;

        let mut document = self.store.load()?;
        let id = self.fresh_id(&document)?;

        let issue = Issue {
            id,
            title: draft.title.trim().to_string(),
            description: draft.description.trim().to_string(),
            status: Status::Open,
            author_id: draft.author_id.trim().to_string(),
            assignees: dedupe_ids(&draft.assignees),
            tags: normalize_tags(&draft.tags),
            created_at: Utc::now(),
            closed_at: None,
            deadline,
            effort: draft.effort,
        };

        document.issues.insert(0, issue.clone());
        self.store.save(&document)?;

        tracing::debug!(id = %issue.id, author = %issue.author_id, "Created issue");
        Ok(issue)
    }

    fn fresh_id(&self, document: &Document) -> Result<String> {
        let mut last = String::new();
        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = self.ids.next_id();
            if !document.contains_issue(&candidate) {
                return Ok(candidate);
            }
            tracing::debug!(id = %candidate, attempt, "Generated id already in use");
            last = candidate;
        }
        Err(IssueFlowError::IdCollision { id: last })
    }

    /// Merge `patch` onto the issue with this id.
    ///
    /// Moving the status to `closed` stamps `closedAt` unless it is already
    /// set; moving it anywhere else clears `closedAt`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if the id is unknown,
    /// `Validation`/`ValidationErrors` for an invalid field,
    /// or `Persistence` if the write fails.
    pub fn update_issue(&self, id: &str, patch: &IssuePatch) -> Result<Issue> {
        IssueValidator::validate_patch(patch)?;

        let mut document = self.store.load()?;
        let issue = document
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(|| not_found(id))?;

        apply_patch(issue, patch);
        let updated = issue.clone();
        self.store.save(&document)?;

        tracing::debug!(id = %updated.id, status = %updated.status, "Updated issue");
        Ok(updated)
    }

    /// Mark an issue closed and stamp `closedAt`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `Persistence`.
    pub fn close_issue(&self, id: &str) -> Result<Issue> {
        self.set_status(id, Status::Closed)
    }

    /// Return an issue to `open` and clear `closedAt`.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `Persistence`.
    pub fn reopen_issue(&self, id: &str) -> Result<Issue> {
        self.set_status(id, Status::Open)
    }

    fn set_status(&self, id: &str, status: Status) -> Result<Issue> {
        let mut document = self.store.load()?;
        let issue = document
            .issues
            .iter_mut()
            .find(|issue| issue.id == id)
            .ok_or_else(|| not_found(id))?;

        issue.status = status;
        issue.closed_at = status.is_closed().then(Utc::now);
        let updated = issue.clone();
        self.store.save(&document)?;

        tracing::debug!(id = %updated.id, status = %updated.status, "Changed issue status");
        Ok(updated)
    }

    /// Remove an issue and return it.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` or `Persistence`.
    pub fn delete_issue(&self, id: &str) -> Result<Issue> {
        let mut document = self.store.load()?;
        let index = document
            .issues
            .iter()
            .position(|issue| issue.id == id)
            .ok_or_else(|| not_found(id))?;

        let removed = document.issues.remove(index);
        self.store.save(&document)?;

        tracing::debug!(id = %removed.id, "Deleted issue");
        Ok(removed)
    }

    /// Replace everything with the bundled default dataset.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the write fails.
    pub fn reset(&self) -> Result<Document> {
        let document = self.store.reset()?;
        tracing::info!(issues = document.issues.len(), "Reset to default dataset");
        Ok(document)
    }
}

fn not_found(id: &str) -> IssueFlowError {
    IssueFlowError::IssueNotFound { id: id.to_string() }
}

fn apply_patch(issue: &mut Issue, patch: &IssuePatch) {
    if let Some(title) = &patch.title {
        issue.title = title.trim().to_string();
    }
    if let Some(description) = &patch.description {
        issue.description = description.trim().to_string();
    }
    if let Some(assignees) = &patch.assignees {
        issue.assignees = dedupe_ids(assignees);
    }
    if let Some(tags) = &patch.tags {
        issue.tags = normalize_tags(tags);
    }
    if let Some(deadline) = patch.deadline {
        issue.deadline = deadline;
    }
    if let Some(effort) = patch.effort {
        issue.effort = effort;
    }
    if let Some(status) = patch.status {
        issue.status = status;
        if status.is_closed() {
            if issue.closed_at.is_none() {
                issue.closed_at = Some(Utc::now());
            }
        } else {
            issue.closed_at = None;
        }
    }
}
