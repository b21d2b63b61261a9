//! Input types for issue operations and view derivation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::IssueFlowError;
use crate::model::Status;

/// Deserialize a present field (including `null`) as `Some`, so an absent
/// field stays `None` through `#[serde(default)]`.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// User input for a new issue, before ids and timestamps are assigned.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueDraft {
    pub title: String,
    pub description: String,
    pub author_id: String,
    #[serde(default)]
    pub assignees: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// `YYYY-MM-DD` or RFC 3339; blank means no deadline.
    #[serde(default)]
    pub deadline: Option<String>,
    /// Days; must be positive when given.
    #[serde(default)]
    pub effort: Option<u32>,
}

/// Fields to merge onto an existing issue.
///
/// Outer `None` leaves the field untouched. For nullable fields,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuePatch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<Status>,
    #[serde(default)]
    pub assignees: Option<Vec<String>>,
    /// Replaces the whole tag list; it is not merged with the existing tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub deadline: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "deserialize_present")]
    pub effort: Option<Option<u32>>,
}

impl IssuePatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assignees.is_none()
            && self.tags.is_none()
            && self.deadline.is_none()
            && self.effort.is_none()
    }
}

/// Narrow the list to issues related to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterType {
    /// Issues whose assignees include the current user.
    Assigned,
    /// Issues authored by the current user.
    Created,
}

impl FilterType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Assigned => "assigned",
            Self::Created => "created",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterType {
    type Err = IssueFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assigned" => Ok(Self::Assigned),
            "created" => Ok(Self::Created),
            other => Err(IssueFlowError::InvalidFilter {
                filter: other.to_string(),
            }),
        }
    }
}

/// The single active ordering of the issue list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortBy {
    #[default]
    CreatedDesc,
    CreatedAsc,
    TitleAsc,
    TitleDesc,
    Status,
    EffortDesc,
    EffortAsc,
}

impl SortBy {
    pub const ALL: [Self; 7] = [
        Self::CreatedDesc,
        Self::CreatedAsc,
        Self::TitleAsc,
        Self::TitleDesc,
        Self::Status,
        Self::EffortDesc,
        Self::EffortAsc,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CreatedDesc => "created-desc",
            Self::CreatedAsc => "created-asc",
            Self::TitleAsc => "title-asc",
            Self::TitleDesc => "title-desc",
            Self::Status => "status",
            Self::EffortDesc => "effort-desc",
            Self::EffortAsc => "effort-asc",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = IssueFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|sort| sort.as_str() == key)
            .ok_or(IssueFlowError::InvalidSort { key })
    }
}

impl<'de> Deserialize<'de> for SortBy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Filter and sort selections for the issue list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewOptions {
    pub filter: Option<FilterType>,
    /// Matching any one selected tag keeps the issue.
    pub tags: BTreeSet<String>,
    pub sort: SortBy,
    pub current_user_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_keys_round_trip_through_str() {
        for sort in SortBy::ALL {
            assert_eq!(sort.as_str().parse::<SortBy>().unwrap(), sort);
        }
        assert!(matches!(
            "priority".parse::<SortBy>(),
            Err(IssueFlowError::InvalidSort { .. })
        ));
    }

    #[test]
    fn test_filter_type_parse() {
        assert_eq!("Assigned".parse::<FilterType>().unwrap(), FilterType::Assigned);
        assert!("mine".parse::<FilterType>().is_err());
    }

    #[test]
    fn test_patch_distinguishes_null_from_absent() {
        let patch: IssuePatch = serde_json::from_str(r#"{"effort": null}"#).unwrap();
        assert_eq!(patch.effort, Some(None));
        assert_eq!(patch.deadline, None);

        let patch: IssuePatch = serde_json::from_str(r#"{"effort": 4}"#).unwrap();
        assert_eq!(patch.effort, Some(Some(4)));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(IssuePatch::default().is_empty());
        let patch = IssuePatch {
            tags: Some(vec![]),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_draft_from_camel_case_json() {
        let draft: IssueDraft = serde_json::from_str(
            r#"{"title":"T","description":"D","authorId":"u1","tags":["Bug"],"effort":2}"#,
        )
        .unwrap();
        assert_eq!(draft.author_id, "u1");
        assert_eq!(draft.tags, vec!["Bug".to_string()]);
        assert_eq!(draft.deadline, None);
    }
}
