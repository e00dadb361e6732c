//! Executes core `HttpRequest`s over the network.

use async_trait::async_trait;
use meals_core::{HttpMethod, HttpRequest, HttpResponse, TransportError};

use crate::error::AppResult;

/// Performs the round-trip the core describes. Non-2xx statuses are data,
/// not errors; only failures to get any response at all are `Err`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport whose requests carry only the headers the core
    /// asks for.
    pub fn new() -> AppResult<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;
        let status = response.status();

        // A failure status settles the fetch on its own; a body that breaks
        // off mid-read must not turn it into a transport error.
        let body = match response.text().await {
            Ok(body) => body,
            Err(err) if !status.is_success() => {
                tracing::debug!(status = status.as_u16(), error = %err, "dropping unreadable error body");
                String::new()
            }
            Err(err) => return Err(TransportError::new(err.to_string())),
        };

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "collection response received");
        Ok(HttpResponse::new(status.as_u16(), body))
    }
}
