use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use linkqa_logging::{linkqa_error, linkqa_info, linkqa_warn};
use tokio_util::sync::CancellationToken;

use crate::client::{ChannelEventSink, ProcessingClient, ReqwestProcessingClient};
use crate::{ClientError, ClientSettings, EngineEvent, FailureKind, ProcessRequest, RequestId};

enum EngineCommand {
    Send {
        request_id: RequestId,
        request: ProcessRequest,
    },
}

/// Handle to the background request thread.
///
/// Commands are handled one at a time, in the order they were sent. Every
/// accepted command produces exactly one `RequestCompleted` event. Dropping
/// the handle cancels whatever request is in flight.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings) -> Self {
        Self::with_client(Arc::new(ReqwestProcessingClient::new(settings)))
    }

    pub fn with_client(client: Arc<dyn ProcessingClient>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let cancel = CancellationToken::new();
        let worker_cancel = cancel.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => Some(runtime),
                Err(err) => {
                    linkqa_error!("Failed to start tokio runtime: {}", err);
                    None
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                match runtime.as_ref() {
                    Some(runtime) => runtime.block_on(handle_command(
                        client.as_ref(),
                        command,
                        &event_tx,
                        &worker_cancel,
                    )),
                    None => reject_command(command, &event_tx),
                }
            }
        });

        Self {
            cmd_tx,
            event_rx,
            cancel,
        }
    }

    pub fn send(&self, request_id: RequestId, request: ProcessRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Send {
            request_id,
            request,
        });
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// `Disconnected` means the engine thread is gone and no further events
    /// will arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, mpsc::RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }

    /// Cancels the in-flight request and every request sent after it.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    client: &dyn ProcessingClient,
    command: EngineCommand,
    event_tx: &mpsc::Sender<EngineEvent>,
    cancel: &CancellationToken,
) {
    match command {
        EngineCommand::Send {
            request_id,
            request,
        } => {
            let sink = ChannelEventSink::new(event_tx.clone());
            let result = tokio::select! {
                result = client.process(request_id, &request, &sink) => result,
                _ = cancel.cancelled() => Err(ClientError::new(
                    FailureKind::Cancelled,
                    "engine shut down",
                )),
            };
            match &result {
                Ok(response) => linkqa_info!(
                    "request_id={} answered answer_len={} sources={}",
                    request_id,
                    response.answer.len(),
                    response.sources.len()
                ),
                Err(err) => linkqa_warn!("request_id={} failed: {}", request_id, err),
            }
            let _ = event_tx.send(EngineEvent::RequestCompleted { request_id, result });
        }
    }
}

fn reject_command(command: EngineCommand, event_tx: &mpsc::Sender<EngineEvent>) {
    match command {
        EngineCommand::Send { request_id, .. } => {
            let _ = event_tx.send(EngineEvent::RequestCompleted {
                request_id,
                result: Err(ClientError::new(
                    FailureKind::Network,
                    "request runtime unavailable",
                )),
            });
        }
    }
}
