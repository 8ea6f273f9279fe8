use serde::Serialize;

use crate::{Mode, SourceList};

/// Question sent when the user leaves the query box blank in query mode.
pub const DEFAULT_QUERY: &str = "Explain the content";

/// JSON body sent to the processing service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestPayload {
    pub urls: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Derives the request body from the current form contents.
///
/// Links are projected in list order without any filtering. In query mode a
/// blank query is replaced by `default_query`; summary mode never sends one.
pub fn build_payload(
    sources: &SourceList,
    mode: Mode,
    query: &str,
    default_query: &str,
) -> RequestPayload {
    let query = match mode {
        Mode::Query if query.trim().is_empty() => Some(default_query.to_string()),
        Mode::Query => Some(query.to_string()),
        Mode::Summary => None,
    };
    RequestPayload {
        urls: sources.links(),
        query,
    }
}
