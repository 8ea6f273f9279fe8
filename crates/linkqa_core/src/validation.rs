use std::fmt;

use crate::{AppState, SourceId};

/// Required-field problems that keep a submission from starting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The URL field of this entry is blank.
    EmptyLink { id: SourceId },
    /// There is no source entry at all.
    NoSources,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyLink { id } => write!(f, "source {id}: this field is required"),
            ValidationError::NoSources => write!(f, "add at least one source URL"),
        }
    }
}

/// Checks the form's required fields.
///
/// The query box is never required: a blank query falls back to the default
/// question when the payload is built.
pub fn validate(state: &AppState) -> Vec<ValidationError> {
    let sources = state.sources();
    if sources.is_empty() {
        return vec![ValidationError::NoSources];
    }
    sources
        .entries()
        .into_iter()
        .filter(|entry| entry.link.trim().is_empty())
        .map(|entry| ValidationError::EmptyLink { id: entry.id })
        .collect()
}
