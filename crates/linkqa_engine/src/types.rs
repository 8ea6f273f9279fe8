use std::fmt;

use serde::Deserialize;

pub type RequestId = u64;

/// Which service route a request goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Query,
    Summary,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProcessRequest {
    pub endpoint: Endpoint,
    /// JSON body, sent as is.
    pub body: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessResponse {
    pub answer: String,
    pub sources: Vec<String>,
}

/// Success body as the service sends it; `sources` may be absent or null.
#[derive(Debug, Deserialize)]
pub(crate) struct WireAnswer {
    pub answer: String,
    #[serde(default)]
    pub sources: Option<Vec<String>>,
}

impl From<WireAnswer> for ProcessResponse {
    fn from(wire: WireAnswer) -> Self {
        Self {
            answer: wire.answer,
            sources: wire.sources.unwrap_or_default(),
        }
    }
}

/// Error body the service sends with 4xx/5xx statuses.
#[derive(Debug, Deserialize)]
pub(crate) struct WireError {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    RequestStarted {
        request_id: RequestId,
        url: String,
    },
    RequestCompleted {
        request_id: RequestId,
        result: Result<ProcessResponse, ClientError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ClientError {
    pub kind: FailureKind,
    pub message: String,
}

impl ClientError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidEndpoint,
    Network,
    Timeout,
    HttpStatus(u16),
    MalformedResponse,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Cancelled,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidEndpoint => write!(f, "invalid endpoint"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::MalformedResponse => write!(f, "malformed response"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}
