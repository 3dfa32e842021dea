//! Resolution of full or partial task identifiers.

use super::Task;

/// Outcome of matching a user-supplied identifier against a candidate set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Exactly one task matched.
    Found(Task),
    /// No task matched.
    NotFound,
    /// More than one task matched the prefix; carries every match.
    Ambiguous(Vec<Task>),
}

impl Resolution {
    /// Returns the matched task when resolution was unique.
    #[must_use]
    pub fn found(self) -> Option<Task> {
        match self {
            Self::Found(task) => Some(task),
            Self::NotFound | Self::Ambiguous(_) => None,
        }
    }
}

/// Resolves `query` against `candidates`.
///
/// Matching is case-insensitive over the canonical hyphenated textual form
/// of each identifier. A query equal to a full identifier wins outright;
/// otherwise every candidate whose identifier starts with the query is a
/// match. An empty (or whitespace-only) query matches nothing.
///
/// The candidate slice is only read; callers decide where it comes from.
#[must_use]
pub fn resolve(query: &str, candidates: &[Task]) -> Resolution {
    let needle = query.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return Resolution::NotFound;
    }

    let keyed: Vec<(String, &Task)> = candidates
        .iter()
        .map(|task| (task.id().to_string().to_ascii_lowercase(), task))
        .collect();

    if let Some((_, exact)) = keyed.iter().find(|(key, _)| *key == needle) {
        return Resolution::Found((*exact).clone());
    }

    let mut matches: Vec<Task> = keyed
        .into_iter()
        .filter(|(key, _)| key.starts_with(&needle))
        .map(|(_, task)| task.clone())
        .collect();

    match matches.len() {
        0 => Resolution::NotFound,
        1 => matches.pop().map_or(Resolution::NotFound, Resolution::Found),
        _ => Resolution::Ambiguous(matches),
    }
}
