//! Abstract request/response contract between the state layer and HTTP.
//!
//! [`Transport`] is the seam the state containers depend on: a request
//! described by method, path, query parameters, and body, answered by a
//! status code plus a best-effort parsed JSON body. Production code uses
//! [`HttpTransport`](crate::http::HttpTransport); tests substitute a
//! scripted double.

use async_trait::async_trait;

/// HTTP method subset used by the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Delete,
}

/// Body attached to an outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    None,
    Json(serde_json::Value),
    Form(Vec<(String, String)>),
}

/// A single request to the backend, independent of any HTTP library.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the configured base URL, e.g. `/projects/`.
    pub path: String,
    /// Query parameters appended to the URL.
    pub query: Vec<(String, String)>,
    pub body: RequestBody,
}

impl ApiRequest {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::None,
        }
    }

    /// A `GET` request for `path`.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    /// A `POST` request for `path`.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// A `DELETE` request for `path`.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a form-urlencoded body.
    pub fn with_form(mut self, pairs: Vec<(String, String)>) -> Self {
        self.body = RequestBody::Form(pairs);
        self
    }
}

/// Raw backend response: status code plus best-effort parsed JSON body.
///
/// A body that is absent or not valid JSON is `None`; status interpretation
/// is left to the caller.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Option<serde_json::Value>,
}

/// A failure below the HTTP layer (connection refused, DNS, TLS).
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// Object-safe transport seam.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return the raw response.
    ///
    /// Implementations return `Err` only for failures below the HTTP layer;
    /// a non-success status code is a valid [`RawResponse`].
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_accumulates_query_and_body() {
        let request = ApiRequest::post("/projects/")
            .with_query("token", "tok-1")
            .with_json(serde_json::json!({"title": "Orbit"}));

        assert_eq!(request.method, Method::Post);
        assert_eq!(request.path, "/projects/");
        assert_eq!(request.query, vec![("token".to_string(), "tok-1".to_string())]);
        assert_eq!(
            request.body,
            RequestBody::Json(serde_json::json!({"title": "Orbit"}))
        );
    }

    #[test]
    fn bare_request_has_no_body() {
        let request = ApiRequest::get("/projects/");
        assert_eq!(request.body, RequestBody::None);
        assert!(request.query.is_empty());
    }
}
