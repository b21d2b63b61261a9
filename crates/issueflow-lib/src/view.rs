//! Filtered, sorted views over the issue list.
//!
//! Everything here is a pure function of its inputs: the same issues and
//! options always produce the same ordering.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::model::Issue;
use crate::query::{FilterType, SortBy, ViewOptions};

/// Produce the displayed subset of `issues`, in display order.
///
/// Filters apply in order (user filter, then tags); the sort is stable, so
/// issues with equal keys keep their input order.
#[must_use]
pub fn derive_view<'a>(issues: &'a [Issue], options: &ViewOptions) -> Vec<&'a Issue> {
    let mut results: Vec<&Issue> = issues
        .iter()
        .filter(|issue| matches_user_filter(issue, options))
        .filter(|issue| matches_tags(issue, &options.tags))
        .collect();

    sort_issues(&mut results, options.sort);
    results
}

/// Every tag used by any issue, deduplicated and ascending.
#[must_use]
pub fn tag_vocabulary(issues: &[Issue]) -> Vec<String> {
    issues
        .iter()
        .flat_map(|issue| issue.tags.iter().cloned())
        .collect::<BTreeSet<String>>()
        .into_iter()
        .collect()
}

/// Sort in place with the comparator selected by `sort`.
pub fn sort_issues(issues: &mut [&Issue], sort: SortBy) {
    issues.sort_by(|a, b| compare(a, b, sort));
}

fn compare(a: &Issue, b: &Issue, sort: SortBy) -> Ordering {
    match sort {
        SortBy::CreatedDesc => b.created_at.cmp(&a.created_at),
        SortBy::CreatedAsc => a.created_at.cmp(&b.created_at),
        SortBy::TitleAsc => compare_titles(&a.title, &b.title),
        SortBy::TitleDesc => compare_titles(&b.title, &a.title),
        SortBy::Status => a.status.rank().cmp(&b.status.rank()),
        SortBy::EffortDesc => b.effort_or_zero().cmp(&a.effort_or_zero()),
        SortBy::EffortAsc => a.effort_or_zero().cmp(&b.effort_or_zero()),
    }
}

/// Collation-style comparison: base letters first, accents break ties, and
/// titles differing only in case compare equal.
fn compare_titles(a: &str, b: &str) -> Ordering {
    folded(a, false)
        .cmp(folded(b, false))
        .then_with(|| folded(a, true).cmp(folded(b, true)))
}

/// Lowercased canonical decomposition, optionally keeping combining marks.
fn folded(title: &str, keep_marks: bool) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(move |&c| keep_marks || !is_combining_mark(c))
        .flat_map(char::to_lowercase)
}

fn matches_user_filter(issue: &Issue, options: &ViewOptions) -> bool {
    let Some(filter) = options.filter else {
        return true;
    };
    let Some(user_id) = options.current_user_id.as_deref() else {
        return false;
    };

    match filter {
        FilterType::Assigned => issue.is_assigned_to(user_id),
        FilterType::Created => issue.author_id == user_id,
    }
}

fn matches_tags(issue: &Issue, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || issue.tags.iter().any(|tag| selected.contains(tag))
}
