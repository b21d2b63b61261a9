//! ID generation and input normalization utilities.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use uuid::Uuid;

// ============================================================================
// ID Generation
// ============================================================================

/// Source of candidate issue ids.
///
/// The repository checks candidates against existing ids and asks again on
/// collision, so implementations only need to be unlikely to repeat.
pub trait IdGenerator {
    fn next_id(&self) -> String;
}

/// Random ids of the form `issue_<32 hex chars>`.
#[derive(Debug, Clone, Default)]
pub struct UuidIdGenerator {
    prefix: String,
}

impl UuidIdGenerator {
    pub const DEFAULT_PREFIX: &'static str = "issue";

    #[must_use]
    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    #[must_use]
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for UuidIdGenerator {
    fn next_id(&self) -> String {
        let prefix = if self.prefix.is_empty() {
            Self::DEFAULT_PREFIX
        } else {
            &self.prefix
        };
        format!("{prefix}_{}", Uuid::new_v4().simple())
    }
}

// ============================================================================
// Normalization
// ============================================================================

/// Trim, lowercase and deduplicate tags, keeping first-seen order.
/// Blank tags are dropped.
#[must_use]
pub fn normalize_tags<I, S>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        let tag = tag.as_ref().trim().to_lowercase();
        if !tag.is_empty() && !out.contains(&tag) {
            out.push(tag);
        }
    }
    out
}

/// Trim and deduplicate user ids, keeping first-seen order.
#[must_use]
pub fn dedupe_ids<I, S>(ids: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        let id = id.as_ref().trim();
        if !id.is_empty() && !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}

/// Parse a deadline as an RFC 3339 timestamp or a bare `YYYY-MM-DD` date
/// (midnight UTC).
///
/// Returns `Ok(None)` for blank input.
///
/// # Errors
///
/// Returns the rejected input when it is neither format.
pub fn parse_deadline(input: &str) -> Result<Option<DateTime<Utc>>, String> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(Some(ts.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| Some(date.and_time(NaiveTime::MIN).and_utc()))
        .map_err(|_| input.to_string())
}
