use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use linkqa_engine::{
    ClientError, ClientSettings, EngineEvent, EngineHandle, Endpoint, EventSink, FailureKind,
    ProcessRequest, ProcessResponse, ProcessingClient, RequestId,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const WAIT: Duration = Duration::from_secs(5);

fn summary_request() -> ProcessRequest {
    ProcessRequest {
        endpoint: Endpoint::Summary,
        body: json!({ "urls": ["https://a.example.com"] }),
    }
}

fn wait_for_completion(
    engine: &EngineHandle,
) -> (RequestId, Result<ProcessResponse, ClientError>) {
    loop {
        match engine.recv_timeout(WAIT) {
            Ok(EngineEvent::RequestCompleted { request_id, result }) => {
                return (request_id, result)
            }
            Ok(EngineEvent::RequestStarted { .. }) => continue,
            Err(err) => panic!("engine did not complete in time: {err}"),
        }
    }
}

#[test]
fn engine_reports_completion_for_each_request() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let server = runtime.block_on(async {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/process_url_summary"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "answer": "ok" })))
            .mount(&server)
            .await;
        server
    });

    let engine = EngineHandle::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    });
    engine.send(11, summary_request());

    let (request_id, result) = wait_for_completion(&engine);
    assert_eq!(request_id, 11);
    assert_eq!(result.unwrap().answer, "ok");
}

struct SlowClient {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl ProcessingClient for SlowClient {
    async fn process(
        &self,
        _request_id: RequestId,
        _request: &ProcessRequest,
        _sink: &dyn EventSink,
    ) -> Result<ProcessResponse, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(ProcessResponse {
            answer: "too late".to_string(),
            sources: Vec::new(),
        })
    }
}

#[test]
fn shutdown_cancels_in_flight_request() {
    let client = Arc::new(SlowClient {
        calls: AtomicUsize::new(0),
    });
    let engine = EngineHandle::with_client(client.clone());
    engine.send(1, summary_request());

    while client.calls.load(Ordering::SeqCst) == 0 {
        std::thread::sleep(Duration::from_millis(5));
    }
    engine.shutdown();

    let (request_id, result) = wait_for_completion(&engine);
    assert_eq!(request_id, 1);
    assert_eq!(result.unwrap_err().kind, FailureKind::Cancelled);
}

struct OrderedClient;

#[async_trait::async_trait]
impl ProcessingClient for OrderedClient {
    async fn process(
        &self,
        request_id: RequestId,
        _request: &ProcessRequest,
        _sink: &dyn EventSink,
    ) -> Result<ProcessResponse, ClientError> {
        // Earlier requests take longer; completions must still arrive in order.
        tokio::time::sleep(Duration::from_millis(40 / request_id)).await;
        Ok(ProcessResponse {
            answer: format!("answer {request_id}"),
            sources: Vec::new(),
        })
    }
}

#[test]
fn requests_are_handled_one_at_a_time_in_order() {
    let engine = EngineHandle::with_client(Arc::new(OrderedClient));
    engine.send(1, summary_request());
    engine.send(2, summary_request());
    engine.send(3, summary_request());

    let order: Vec<_> = (0..3).map(|_| wait_for_completion(&engine).0).collect();
    assert_eq!(order, vec![1, 2, 3]);
}
