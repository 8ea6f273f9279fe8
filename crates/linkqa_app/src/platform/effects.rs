use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use linkqa_core::{Mode, Msg, OutboundRequest, RequestId, SubmissionError, SubmissionErrorKind};
use linkqa_engine::{
    ClientError, ClientSettings, EngineEvent, EngineHandle, Endpoint, FailureKind, ProcessRequest,
};
use linkqa_logging::{linkqa_debug, linkqa_error, linkqa_info};

/// Executes outbound requests on the engine and turns engine events into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_engine(EngineHandle::new(settings))
    }

    pub fn with_engine(engine: EngineHandle) -> Self {
        Self { engine }
    }

    /// Hands the request to the engine.
    ///
    /// Returns a failure message straight away if the payload cannot be
    /// encoded; otherwise the outcome arrives later through [`Self::next_msg`].
    pub fn send(&self, request: &OutboundRequest) -> Option<Msg> {
        let body = match serde_json::to_value(&request.payload) {
            Ok(body) => body,
            Err(err) => {
                linkqa_error!("request_id={} payload encoding failed: {}", request.request_id, err);
                return Some(Msg::SubmissionFailed {
                    request_id: request.request_id,
                    error: SubmissionError::new(SubmissionErrorKind::Network, err.to_string()),
                });
            }
        };
        linkqa_info!(
            "SendRequest request_id={} mode={} urls={}",
            request.request_id,
            request.mode,
            request.payload.urls.len()
        );
        self.engine.send(
            request.request_id,
            ProcessRequest {
                endpoint: endpoint_for(request.mode),
                body,
            },
        );
        None
    }

    /// Waits up to `timeout` for the outcome of `in_flight`.
    pub fn next_msg(&self, in_flight: RequestId, timeout: Duration) -> Option<Msg> {
        match self.engine.recv_timeout(timeout) {
            Ok(EngineEvent::RequestStarted { request_id, url }) => {
                linkqa_debug!("request_id={} sent to {}", request_id, url);
                None
            }
            Ok(EngineEvent::RequestCompleted { request_id, result }) => Some(match result {
                Ok(response) => Msg::SubmissionSucceeded {
                    request_id,
                    answer: response.answer,
                    sources: response.sources,
                },
                Err(err) => Msg::SubmissionFailed {
                    request_id,
                    error: map_failure(err),
                },
            }),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => {
                linkqa_error!("Request engine stopped with request {} in flight", in_flight);
                Some(Msg::SubmissionFailed {
                    request_id: in_flight,
                    error: SubmissionError::new(
                        SubmissionErrorKind::Network,
                        "request engine stopped",
                    ),
                })
            }
        }
    }
}

fn endpoint_for(mode: Mode) -> Endpoint {
    match mode {
        Mode::Query => Endpoint::Query,
        Mode::Summary => Endpoint::Summary,
    }
}

fn map_failure(err: ClientError) -> SubmissionError {
    let kind = match err.kind {
        FailureKind::HttpStatus(status) => SubmissionErrorKind::Server { status },
        FailureKind::MalformedResponse | FailureKind::TooLarge { .. } => {
            SubmissionErrorKind::MalformedResponse
        }
        FailureKind::InvalidEndpoint
        | FailureKind::Network
        | FailureKind::Timeout
        | FailureKind::Cancelled => SubmissionErrorKind::Network,
    };
    let message = match err.kind {
        FailureKind::HttpStatus(_) | FailureKind::MalformedResponse => err.message,
        other => format!("{other}: {}", err.message),
    };
    SubmissionError::new(kind, message)
}
