use std::time::Duration;

use url::Url;

use crate::{ClientError, Endpoint, FailureKind};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Scheme, host and port of the processing service.
    pub base_url: String,
    /// Absolute path of the question route.
    pub query_path: String,
    /// Absolute path of the summary route.
    pub summary_path: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub max_response_bytes: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            query_path: "/process_url_query".to_string(),
            summary_path: "/process_url_summary".to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(180),
            max_response_bytes: 2 * 1024 * 1024,
        }
    }
}

impl ClientSettings {
    pub fn endpoint_url(&self, endpoint: Endpoint) -> Result<Url, ClientError> {
        let base = Url::parse(&self.base_url).map_err(|err| {
            ClientError::new(
                FailureKind::InvalidEndpoint,
                format!("base url {:?}: {err}", self.base_url),
            )
        })?;
        let path = match endpoint {
            Endpoint::Query => &self.query_path,
            Endpoint::Summary => &self.summary_path,
        };
        base.join(path).map_err(|err| {
            ClientError::new(FailureKind::InvalidEndpoint, format!("path {path:?}: {err}"))
        })
    }
}
