//! Bundled default dataset.
//!
//! Used to seed an empty store on first access and to restore it on reset.

use crate::error::Result;
use crate::model::Document;

const DEFAULT_DOCUMENT: &str = include_str!("../data/default.json");

/// Tags offered when composing an issue, in display order.
pub const PREDEFINED_TAGS: [&str; 12] = [
    "bug",
    "enhancement",
    "documentation",
    "high-priority",
    "critical",
    "performance",
    "ui",
    "backend",
    "frontend",
    "security",
    "mobile",
    "testing",
];

/// Parse the bundled default document.
///
/// # Errors
///
/// Returns `Json` if the bundled data does not match the document schema.
pub fn default_document() -> Result<Document> {
    Ok(serde_json::from_str(DEFAULT_DOCUMENT)?)
}
