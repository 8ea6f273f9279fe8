#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User clicked "+ Add URL".
    SourceAdded,
    /// User clicked Remove next to an entry.
    SourceRemoved { id: crate::SourceId },
    /// User edited the URL field of an entry.
    SourceEdited { id: crate::SourceId, link: String },
    /// User switched between query and summary.
    ModeSelected(crate::Mode),
    /// User edited the query box.
    QueryChanged(String),
    /// User clicked Submit.
    SubmitClicked,
    /// Engine delivered an answer for a request.
    SubmissionSucceeded {
        request_id: crate::RequestId,
        answer: String,
        sources: Vec<String>,
    },
    /// Engine reported that a request failed.
    SubmissionFailed {
        request_id: crate::RequestId,
        error: crate::SubmissionError,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
