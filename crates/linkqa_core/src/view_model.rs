use crate::{Mode, SourceEntry, SubmissionError, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub mode: Mode,
    pub query: String,
    pub sources: Vec<SourceEntry>,
    pub validation_errors: Vec<ValidationError>,
    pub pending: bool,
    /// Answer text after table repair, ready for a Markdown renderer.
    pub answer: Option<String>,
    /// Source URLs the service reports having used, unchanged.
    pub answer_sources: Vec<String>,
    pub error: Option<SubmissionError>,
    pub dirty: bool,
}
