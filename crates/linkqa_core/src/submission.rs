use std::fmt;

use crate::{Mode, RequestPayload};

pub type RequestId = u64;

/// Immutable snapshot of one submission, taken when the user submits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub request_id: RequestId,
    pub mode: Mode,
    pub payload: RequestPayload,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionErrorKind {
    /// The request could not be sent or no response arrived.
    Network,
    /// The service answered with a non-2xx status.
    Server { status: u16 },
    /// The response body was not the expected JSON or lacked `answer`.
    MalformedResponse,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionError {
    pub kind: SubmissionErrorKind,
    pub message: String,
}

impl SubmissionError {
    pub fn new(kind: SubmissionErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for SubmissionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            SubmissionErrorKind::Network => write!(f, "network error: {}", self.message),
            SubmissionErrorKind::Server { status } => {
                write!(f, "server error {status}: {}", self.message)
            }
            SubmissionErrorKind::MalformedResponse => {
                write!(f, "malformed response: {}", self.message)
            }
        }
    }
}

/// What the service returned for a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SubmissionAnswer {
    pub answer: String,
    pub sources: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending {
        request: OutboundRequest,
    },
    Succeeded {
        answer: String,
        sources: Vec<String>,
    },
    Failed {
        error: SubmissionError,
    },
}

impl SubmissionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubmissionState::Pending { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// A request is already in flight; the new one was not started.
    AlreadyPending { in_flight: RequestId },
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitError::AlreadyPending { in_flight } => {
                write!(f, "request {in_flight} is still pending")
            }
        }
    }
}

/// Owns the request lifecycle: at most one request is pending at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionController {
    state: SubmissionState,
    next_request_id: RequestId,
}

impl Default for SubmissionController {
    fn default() -> Self {
        Self {
            state: SubmissionState::Idle,
            next_request_id: 1,
        }
    }
}

impl SubmissionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn in_flight(&self) -> Option<&OutboundRequest> {
        match &self.state {
            SubmissionState::Pending { request } => Some(request),
            _ => None,
        }
    }

    /// Starts a submission, dropping any previous answer.
    ///
    /// Rejected without touching state while another request is pending.
    pub fn submit(
        &mut self,
        mode: Mode,
        payload: RequestPayload,
    ) -> Result<OutboundRequest, SubmitError> {
        if let Some(request) = self.in_flight() {
            return Err(SubmitError::AlreadyPending {
                in_flight: request.request_id,
            });
        }
        let request = OutboundRequest {
            request_id: self.next_request_id,
            mode,
            payload,
        };
        self.next_request_id += 1;
        self.state = SubmissionState::Pending {
            request: request.clone(),
        };
        Ok(request)
    }

    /// Applies the outcome of the in-flight request.
    ///
    /// Returns `false` (and changes nothing) when `request_id` is not the
    /// pending request.
    pub fn resolve(
        &mut self,
        request_id: RequestId,
        outcome: Result<SubmissionAnswer, SubmissionError>,
    ) -> bool {
        match self.in_flight() {
            Some(request) if request.request_id == request_id => {}
            _ => return false,
        }
        self.state = match outcome {
            Ok(SubmissionAnswer { answer, sources }) => {
                SubmissionState::Succeeded { answer, sources }
            }
            Err(error) => SubmissionState::Failed { error },
        };
        true
    }
}
