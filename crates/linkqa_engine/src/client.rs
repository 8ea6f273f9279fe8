use futures_util::StreamExt;
use linkqa_logging::{linkqa_debug, linkqa_warn};
use reqwest::header::{ACCEPT, CONTENT_TYPE};

use crate::types::{WireAnswer, WireError};
use crate::{
    ClientError, ClientSettings, EngineEvent, FailureKind, ProcessRequest, ProcessResponse,
    RequestId,
};

pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait ProcessingClient: Send + Sync {
    /// Sends one request to the processing service and waits for its answer.
    async fn process(
        &self,
        request_id: RequestId,
        request: &ProcessRequest,
        sink: &dyn EventSink,
    ) -> Result<ProcessResponse, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestProcessingClient {
    settings: ClientSettings,
}

impl ReqwestProcessingClient {
    pub fn new(settings: ClientSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    fn build_client(&self) -> Result<reqwest::Client, ClientError> {
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| ClientError::new(FailureKind::Network, err.to_string()))
    }

    /// Reads the whole body, refusing anything above the configured size.
    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClientError> {
        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClientError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl ProcessingClient for ReqwestProcessingClient {
    async fn process(
        &self,
        request_id: RequestId,
        request: &ProcessRequest,
        sink: &dyn EventSink,
    ) -> Result<ProcessResponse, ClientError> {
        let url = self.settings.endpoint_url(request.endpoint)?;
        let body = serde_json::to_vec(&request.body).map_err(|err| {
            ClientError::new(FailureKind::Network, format!("request body: {err}"))
        })?;
        let client = self.build_client()?;

        sink.emit(EngineEvent::RequestStarted {
            request_id,
            url: url.to_string(),
        });
        linkqa_debug!(
            "request_id={} POST {} body_len={}",
            request_id,
            url,
            body.len()
        );

        let response = client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(body)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        let bytes = self.read_body(response).await?;

        if !status.is_success() {
            let message = match serde_json::from_slice::<WireError>(&bytes) {
                Ok(wire) => wire.error,
                Err(_) => status.to_string(),
            };
            linkqa_warn!("request_id={} rejected with {}: {}", request_id, status, message);
            return Err(ClientError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let wire: WireAnswer = serde_json::from_slice(&bytes)
            .map_err(|err| ClientError::new(FailureKind::MalformedResponse, err.to_string()))?;
        Ok(wire.into())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        return ClientError::new(FailureKind::Timeout, err.to_string());
    }
    ClientError::new(FailureKind::Network, err.to_string())
}
