//! Error types for `issueflow-lib`.

use std::path::PathBuf;
use thiserror::Error;

/// Primary error type for issueflow operations.
#[derive(Error, Debug)]
pub enum IssueFlowError {
    // === Lookup Errors ===
    /// Issue with the specified ID was not found.
    #[error("Issue not found: {id}")]
    IssueNotFound { id: String },

    /// User with the specified ID was not found.
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// The id generator kept producing ids that already exist.
    #[error("Issue ID collision: {id}")]
    IdCollision { id: String },

    // === Validation Errors ===
    /// Field validation failed.
    #[error("Validation failed: {field}: {reason}")]
    Validation { field: String, reason: String },

    /// Multiple validation errors occurred.
    #[error("Validation errors: {}", format_errors(.errors))]
    ValidationErrors { errors: Vec<ValidationError> },

    /// Invalid status value.
    #[error("Invalid status: {status}")]
    InvalidStatus { status: String },

    /// Invalid role value.
    #[error("Invalid role: {role}")]
    InvalidRole { role: String },

    /// Unknown sort key.
    #[error("Invalid sort key: {key}")]
    InvalidSort { key: String },

    /// Unknown filter type.
    #[error("Invalid filter: {filter}")]
    InvalidFilter { filter: String },

    // === Session Errors ===
    /// No user is selected.
    #[error("Not logged in: select a user first")]
    NotAuthenticated,

    /// The current user may not perform the action.
    #[error("Permission denied: {user} cannot {action}")]
    PermissionDenied { user: String, action: String },

    // === Storage Errors ===
    /// The persisted document could not be read or written.
    #[error("Persistence error at {}: {reason}", .path.display())]
    Persistence { path: PathBuf, reason: String },

    // === Configuration Errors ===
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    // === I/O Errors ===
    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A single field validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl IssueFlowError {
    #[must_use]
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn persistence(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::Persistence {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    #[must_use]
    pub fn permission_denied(user: impl Into<String>, action: impl Into<String>) -> Self {
        Self::PermissionDenied {
            user: user.into(),
            action: action.into(),
        }
    }

    #[must_use]
    pub fn from_validation_errors(mut errors: Vec<ValidationError>) -> Self {
        if errors.len() == 1 {
            let err = errors.remove(0);
            Self::Validation {
                field: err.field,
                reason: err.message,
            }
        } else {
            Self::ValidationErrors { errors }
        }
    }

    /// True for lookup failures a caller should treat as "go back to the list".
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::IssueNotFound { .. } | Self::UserNotFound { .. })
    }
}

/// Result type using `IssueFlowError`.
pub type Result<T> = std::result::Result<T, IssueFlowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_validation_error_collapses() {
        let err = IssueFlowError::from_validation_errors(vec![ValidationError::new(
            "title",
            "cannot be empty",
        )]);
        assert!(matches!(err, IssueFlowError::Validation { ref field, .. } if field == "title"));
    }

    #[test]
    fn test_multiple_validation_errors_listed() {
        let err = IssueFlowError::from_validation_errors(vec![
            ValidationError::new("title", "cannot be empty"),
            ValidationError::new("description", "cannot be empty"),
        ]);
        assert_eq!(
            err.to_string(),
            "Validation errors: title: cannot be empty; description: cannot be empty"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(IssueFlowError::IssueNotFound { id: "x".into() }.is_not_found());
        assert!(!IssueFlowError::NotAuthenticated.is_not_found());
    }
}
