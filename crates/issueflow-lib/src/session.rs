//! The currently selected user.
//!
//! There are no credentials: logging in is picking a known user. The CLI
//! keeps the selection in a small JSON file between invocations.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{IssueFlowError, Result};
use crate::model::{Issue, Status, User};
use crate::query::IssuePatch;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord {
    user_id: String,
}

/// Holds at most one current user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    current: Option<User>,
}

impl Session {
    /// A logged-out session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `user_id` from `users` as the current user.
    ///
    /// # Errors
    ///
    /// Returns `UserNotFound` if no user has that id; the session is unchanged.
    pub fn select_user(&mut self, users: &[User], user_id: &str) -> Result<&User> {
        let user = users
            .iter()
            .find(|u| u.id == user_id)
            .ok_or_else(|| IssueFlowError::UserNotFound {
                id: user_id.to_string(),
            })?;
        tracing::debug!(user = %user.id, "Selected user");
        Ok(&*self.current.insert(user.clone()))
    }

    pub fn logout(&mut self) {
        if let Some(user) = self.current.take() {
            tracing::debug!(user = %user.id, "Logged out");
        }
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// The current user, for views that need one.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` when no user is selected.
    pub fn require_user(&self) -> Result<&User> {
        self.current.as_ref().ok_or(IssueFlowError::NotAuthenticated)
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// Restore a session saved by [`Session::persist`].
    ///
    /// A missing or unreadable file, or one naming a user that no longer
    /// exists, restores as logged out.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file exists but cannot be read.
    pub fn restore(path: &Path, users: &[User]) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => return Err(e.into()),
        };

        let mut session = Self::new();
        match serde_json::from_str::<SessionRecord>(&contents) {
            Ok(record) => {
                if session.select_user(users, &record.user_id).is_err() {
                    tracing::warn!(user = %record.user_id, "Session names an unknown user; ignoring");
                }
            }
            Err(e) => tracing::warn!(error = %e, "Session file is unreadable; ignoring"),
        }
        Ok(session)
    }

    /// Save the selection, or remove the file when logged out.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the file cannot be written or removed.
    pub fn persist(&self, path: &Path) -> Result<()> {
        let Some(user) = &self.current else {
            return Self::clear(path);
        };

        let record = SessionRecord {
            user_id: user.id.clone(),
        };
        let json = serde_json::to_string(&record)?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| IssueFlowError::persistence(path, e))?;
        }
        fs::write(path, json).map_err(|e| IssueFlowError::persistence(path, e))
    }

    /// Remove a saved session. Missing files are fine.
    ///
    /// # Errors
    ///
    /// Returns `Persistence` if the file exists but cannot be removed.
    pub fn clear(path: &Path) -> Result<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(IssueFlowError::persistence(path, e)),
        }
    }
}

// ============================================================================
// Permissions
// ============================================================================

/// Only the author may edit, and only while the issue is not closed.
#[must_use]
pub fn can_edit(user: &User, issue: &Issue) -> bool {
    user.id == issue.author_id && !issue.status.is_closed()
}

/// Only admins may close or reopen.
#[must_use]
pub const fn can_close(user: &User) -> bool {
    user.is_admin()
}

/// Authors and admins may delete.
#[must_use]
pub fn can_delete(user: &User, issue: &Issue) -> bool {
    user.is_admin() || user.id == issue.author_id
}

/// Check that `user` may apply `patch` to `issue`.
///
/// A patch that sets the status to `closed` counts as closing and needs an
/// admin.
///
/// # Errors
///
/// Returns `PermissionDenied` naming the refused action.
pub fn authorize_update(user: &User, issue: &Issue, patch: &IssuePatch) -> Result<()> {
    if !can_edit(user, issue) {
        return Err(IssueFlowError::permission_denied(
            &user.name,
            format!("edit {}", issue.id),
        ));
    }
    if patch.status == Some(Status::Closed) && !can_close(user) {
        return Err(IssueFlowError::permission_denied(
            &user.name,
            format!("close {}", issue.id),
        ));
    }
    Ok(())
}

/// Check that `user` may close or reopen issues.
///
/// # Errors
///
/// Returns `PermissionDenied` for non-admins.
pub fn authorize_close(user: &User, issue_id: &str) -> Result<()> {
    if can_close(user) {
        Ok(())
    } else {
        Err(IssueFlowError::permission_denied(
            &user.name,
            format!("close or reopen {issue_id}"),
        ))
    }
}

/// # Errors
///
/// Returns `PermissionDenied` unless `user` wrote the issue or is an admin.
pub fn authorize_delete(user: &User, issue: &Issue) -> Result<()> {
    if can_delete(user, issue) {
        Ok(())
    } else {
        Err(IssueFlowError::permission_denied(
            &user.name,
            format!("delete {}", issue.id),
        ))
    }
}
