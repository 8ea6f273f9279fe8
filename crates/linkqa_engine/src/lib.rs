//! Linkqa engine: talks to the processing service and reports back as events.
mod client;
mod engine;
mod settings;
mod types;

pub use client::{ChannelEventSink, EventSink, ProcessingClient, ReqwestProcessingClient};
pub use engine::EngineHandle;
pub use settings::ClientSettings;
pub use types::{
    ClientError, EngineEvent, Endpoint, FailureKind, ProcessRequest, ProcessResponse, RequestId,
};
