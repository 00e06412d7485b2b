//! Typed wrappers for the showcase backend's REST endpoints.
//!
//! [`VitrineApi`] builds [`ApiRequest`]s for each endpoint, sends them
//! through the configured [`Transport`], classifies non-success statuses
//! into [`ApiError`], and decodes success bodies into the core models.
//!
//! Authenticated endpoints take the token as a `token` query parameter,
//! the convention the backend uses uniformly.

use std::sync::Arc;

use serde::Deserialize;
use serde_json::json;

use vitrine_core::models::{AnalyticsResponse, Profile, Project, Review};
use vitrine_core::types::Id;

use crate::config::LoginEncoding;
use crate::error::{ApiError, ErrorKind};
use crate::transport::{ApiRequest, RawResponse, Transport, TransportError};

/// Typed client for a single showcase backend.
///
/// Cheap to clone; the transport is shared behind an `Arc`.
#[derive(Clone)]
pub struct VitrineApi {
    transport: Arc<dyn Transport>,
    login_encoding: LoginEncoding,
}

/// Response returned by `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    /// Opaque credential presented on subsequent authenticated calls.
    pub access_token: String,
    /// Token scheme as reported by the backend (always `"bearer"`).
    pub token_type: String,
}

impl VitrineApi {
    /// Create a client over the given transport.
    pub fn new(transport: Arc<dyn Transport>, login_encoding: LoginEncoding) -> Self {
        Self {
            transport,
            login_encoding,
        }
    }

    /// Create a new account. Does not authenticate.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Profile, ApiError> {
        let request = ApiRequest::post("/auth/register").with_json(json!({
            "email": email,
            "username": username,
            "password": password,
        }));
        self.fetch(request).await
    }

    /// Exchange credentials for an access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let request = match self.login_encoding {
            LoginEncoding::Json => ApiRequest::post("/auth/login").with_json(json!({
                "username": username,
                "password": password,
            })),
            LoginEncoding::Form => ApiRequest::post("/auth/login").with_form(vec![
                ("username".to_string(), username.to_string()),
                ("password".to_string(), password.to_string()),
            ]),
        };
        self.fetch(request).await
    }

    /// Fetch the profile the token belongs to.
    pub async fn current_user(&self, token: &str) -> Result<Profile, ApiError> {
        let request = ApiRequest::get("/auth/me").with_query("token", token);
        self.fetch(request).await
    }

    /// List all projects, newest first (server ordering).
    pub async fn list_projects(&self) -> Result<Vec<Project>, ApiError> {
        self.fetch(ApiRequest::get("/projects/")).await
    }

    /// List the authenticated user's projects.
    pub async fn my_projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
        let request = ApiRequest::get("/projects/my").with_query("token", token);
        self.fetch(request).await
    }

    /// Create a project and return the canonical record echoed by the
    /// server.
    pub async fn create_project(
        &self,
        token: &str,
        title: &str,
        description: &str,
        url: &str,
    ) -> Result<Project, ApiError> {
        let request = ApiRequest::post("/projects/")
            .with_query("token", token)
            .with_json(json!({
                "title": title,
                "description": description,
                "project_url": url,
            }));
        self.fetch(request).await
    }

    /// Like a project. The response body is discarded; callers re-fetch
    /// the project list for authoritative counters.
    pub async fn like_project(&self, token: &str, project_id: Id) -> Result<(), ApiError> {
        let request =
            ApiRequest::post(format!("/projects/{project_id}/like")).with_query("token", token);
        self.execute(request).await
    }

    /// Remove a like from a project.
    pub async fn unlike_project(&self, token: &str, project_id: Id) -> Result<(), ApiError> {
        let request =
            ApiRequest::delete(format!("/projects/{project_id}/like")).with_query("token", token);
        self.execute(request).await
    }

    /// Whether the authenticated user has liked the project.
    pub async fn check_liked(&self, token: &str, project_id: Id) -> Result<bool, ApiError> {
        let request =
            ApiRequest::get(format!("/projects/{project_id}/liked")).with_query("token", token);
        self.fetch(request).await
    }

    /// Leave a review on a project.
    pub async fn create_review(
        &self,
        token: &str,
        project_id: Id,
        content: &str,
        rating: i32,
    ) -> Result<Review, ApiError> {
        let request = ApiRequest::post(format!("/projects/{project_id}/review"))
            .with_query("token", token)
            .with_json(json!({
                "content": content,
                "rating": rating,
            }));
        self.fetch(request).await
    }

    /// Fetch all reviews for a project.
    pub async fn project_reviews(&self, project_id: Id) -> Result<Vec<Review>, ApiError> {
        self.fetch(ApiRequest::get(format!("/projects/{project_id}/reviews")))
            .await
    }

    /// Fetch aggregate analytics plus the server-ranked top projects.
    pub async fn analytics(&self) -> Result<AnalyticsResponse, ApiError> {
        self.fetch(ApiRequest::get("/projects/analytics/top")).await
    }

    // ---- private helpers ----

    /// Send a request, mapping transport failures and non-success statuses
    /// into [`ApiError`].
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let path = request.path.clone();
        let response = self
            .transport
            .send(request)
            .await
            .map_err(|TransportError(message)| ApiError::Transport(message))?;

        if !(200..300).contains(&response.status) {
            tracing::debug!(%path, status = response.status, "Backend rejected request");
            return Err(ApiError::Rejected {
                status: response.status,
                kind: ErrorKind::from_status(response.status),
                body: response.body,
            });
        }

        Ok(response)
    }

    /// Send a request and decode the success body into `T`.
    async fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<T, ApiError> {
        let response = self.send(request).await?;
        let body = response
            .body
            .ok_or_else(|| ApiError::Decode("empty response body".to_string()))?;
        serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Send a request, discarding the success body.
    async fn execute(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{Method, RequestBody};
    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Transport double that answers every request with one canned
    /// response and records what was sent.
    struct CannedTransport {
        response: Result<RawResponse, String>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl CannedTransport {
        fn ok(status: u16, body: serde_json::Value) -> Self {
            Self {
                response: Ok(RawResponse {
                    status,
                    body: Some(body),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn unreachable(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().expect("lock poisoned").clone()
        }
    }

    #[async_trait]
    impl Transport for CannedTransport {
        async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
            self.requests.lock().expect("lock poisoned").push(request);
            match &self.response {
                Ok(response) => Ok(response.clone()),
                Err(message) => Err(TransportError(message.clone())),
            }
        }
    }

    fn api(transport: Arc<CannedTransport>) -> VitrineApi {
        VitrineApi::new(transport, LoginEncoding::Json)
    }

    #[tokio::test]
    async fn login_decodes_token_response() {
        let transport = Arc::new(CannedTransport::ok(
            200,
            serde_json::json!({"access_token": "tok-1", "token_type": "bearer"}),
        ));
        let response = api(Arc::clone(&transport))
            .login("alice", "hunter2")
            .await
            .expect("login should succeed");

        assert_eq!(response.access_token, "tok-1");
        assert_eq!(response.token_type, "bearer");

        let sent = transport.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, Method::Post);
        assert_eq!(sent[0].path, "/auth/login");
        assert_matches!(sent[0].body, RequestBody::Json(_));
    }

    #[tokio::test]
    async fn form_encoding_sends_form_body() {
        let transport = Arc::new(CannedTransport::ok(
            200,
            serde_json::json!({"access_token": "tok-1", "token_type": "bearer"}),
        ));
        let api = VitrineApi::new(Arc::clone(&transport) as Arc<dyn Transport>, LoginEncoding::Form);
        api.login("alice", "hunter2").await.expect("login should succeed");

        let sent = transport.sent();
        assert_matches!(&sent[0].body, RequestBody::Form(pairs) => {
            assert_eq!(pairs.len(), 2);
            assert_eq!(pairs[0], ("username".to_string(), "alice".to_string()));
        });
    }

    #[tokio::test]
    async fn authenticated_calls_pass_token_as_query() {
        let transport = Arc::new(CannedTransport::ok(200, serde_json::json!([])));
        api(Arc::clone(&transport))
            .my_projects("tok-9")
            .await
            .expect("listing should succeed");

        let sent = transport.sent();
        assert_eq!(sent[0].path, "/projects/my");
        assert_eq!(
            sent[0].query,
            vec![("token".to_string(), "tok-9".to_string())]
        );
    }

    #[tokio::test]
    async fn rejection_is_classified_with_body() {
        let transport = Arc::new(CannedTransport::ok(
            401,
            serde_json::json!({"detail": "Invalid token"}),
        ));
        let error = api(transport)
            .current_user("stale")
            .await
            .expect_err("401 must surface as an error");

        assert_matches!(&error, ApiError::Rejected { status: 401, kind: ErrorKind::Auth, .. });
        assert_eq!(error.user_message(), "Invalid token");
    }

    #[tokio::test]
    async fn unreachable_backend_is_a_transport_error() {
        let transport = Arc::new(CannedTransport::unreachable("connection refused"));
        let error = api(transport)
            .list_projects()
            .await
            .expect_err("network failure must surface");

        assert_matches!(&error, ApiError::Transport(_));
        assert_eq!(error.user_message(), "connection refused");
    }

    #[tokio::test]
    async fn like_discards_response_body() {
        let transport = Arc::new(CannedTransport::ok(
            200,
            serde_json::json!({"id": 1, "user_id": 2, "project_id": 3, "created_at": "2024-05-01T12:00:00Z"}),
        ));
        api(Arc::clone(&transport))
            .like_project("tok-1", 3)
            .await
            .expect("like should succeed");

        let sent = transport.sent();
        assert_eq!(sent[0].path, "/projects/3/like");
        assert_eq!(sent[0].method, Method::Post);
    }

    #[tokio::test]
    async fn undecodable_success_body_is_a_decode_error() {
        let transport = Arc::new(CannedTransport::ok(200, serde_json::json!({"nope": true})));
        let error = api(transport)
            .list_projects()
            .await
            .expect_err("shape mismatch must surface");

        assert_matches!(error, ApiError::Decode(_));
    }
}
