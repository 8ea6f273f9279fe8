//! Linkqa core: pure form-session state machine, request payloads and
//! answer-text repair.
mod effect;
mod mode;
mod msg;
mod payload;
mod sources;
mod state;
mod submission;
mod table;
mod update;
mod validation;
mod view_model;

pub use effect::{Effect, Notice};
pub use mode::Mode;
pub use msg::Msg;
pub use payload::{build_payload, RequestPayload, DEFAULT_QUERY};
pub use sources::{MinEntries, RemoveOutcome, SourceEntry, SourceId, SourceList};
pub use state::{AppState, FormSettings};
pub use submission::{
    OutboundRequest, RequestId, SubmissionAnswer, SubmissionController, SubmissionError,
    SubmissionErrorKind, SubmissionState, SubmitError,
};
pub use table::{is_table_row, normalize_tables};
pub use update::update;
pub use validation::{validate, ValidationError};
pub use view_model::AppViewModel;
