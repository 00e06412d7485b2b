//! Production transport backed by [`reqwest`].

use async_trait::async_trait;

use crate::transport::{ApiRequest, Method, RawResponse, RequestBody, Transport, TransportError};

/// HTTP transport for a single backend instance.
///
/// No request timeout is applied here: a hung call leaves the caller's busy
/// flag raised until the connection resolves, and any user-facing timeout
/// affordance belongs to the consumer.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    /// Create a transport for a backend instance.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `http://localhost:8000`.
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    /// Create a transport reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling across clients).
    pub fn with_client(client: reqwest::Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    /// Backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Delete => self.client.delete(&url),
        };

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }

        builder = match request.body {
            RequestBody::None => builder,
            RequestBody::Json(body) => builder.json(&body),
            RequestBody::Form(pairs) => builder.form(&pairs),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| TransportError(e.to_string()))?;

        let status = response.status().as_u16();
        // Best-effort parse; error bodies and empty bodies become None.
        let body = response.json::<serde_json::Value>().await.ok();

        tracing::debug!(method = ?request.method, path = %request.path, status, "Request completed");

        Ok(RawResponse { status, body })
    }
}
