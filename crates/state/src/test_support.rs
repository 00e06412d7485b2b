//! Scripted transport double and JSON fixtures shared by container tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use vitrine_client::{ApiRequest, RawResponse, Transport, TransportError};

/// Planned outcome for one request, consumed in order.
pub enum Planned {
    /// Respond with a status code and optional JSON body.
    Respond(u16, Option<Value>),
    /// Fail below the HTTP layer with the given message.
    Unreachable(String),
}

impl Planned {
    pub fn ok(body: Value) -> Self {
        Self::Respond(200, Some(body))
    }

    pub fn rejected(status: u16, body: Value) -> Self {
        Self::Respond(status, Some(body))
    }

    pub fn unreachable(message: &str) -> Self {
        Self::Unreachable(message.to_string())
    }
}

/// Transport double that replays a fixed script of responses and records
/// every request it receives.
pub struct ScriptedTransport {
    plan: Mutex<VecDeque<Planned>>,
    requests: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub fn new(plan: Vec<Planned>) -> Self {
        Self {
            plan: Mutex::new(plan.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request sent so far, in order.
    pub fn sent(&self) -> Vec<ApiRequest> {
        self.requests.lock().expect("requests lock poisoned").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests
            .lock()
            .expect("requests lock poisoned")
            .push(request);
        match self
            .plan
            .lock()
            .expect("plan lock poisoned")
            .pop_front()
            .expect("transport received a request beyond its script")
        {
            Planned::Respond(status, body) => Ok(RawResponse { status, body }),
            Planned::Unreachable(message) => Err(TransportError(message)),
        }
    }
}

/// A full project row as returned by `GET /projects/`.
pub fn project_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": "A demo project",
        "project_url": "https://example.com/demo",
        "user_id": 1,
        "username": "alice",
        "likes_count": 0,
        "reviews_count": 0,
        "created_at": "2024-05-01T12:00:00Z",
    })
}

/// A profile row as returned by `/auth/me` and registration.
pub fn profile_json(id: i64, username: &str) -> Value {
    json!({
        "id": id,
        "username": username,
        "email": format!("{username}@example.com"),
        "is_active": true,
        "created_at": "2024-05-01T12:00:00Z",
    })
}

/// A login response carrying `token`.
pub fn token_json(token: &str) -> Value {
    json!({"access_token": token, "token_type": "bearer"})
}

/// A review row as returned by `GET /projects/{id}/reviews`.
pub fn review_json(id: i64, project_id: i64, rating: i32) -> Value {
    json!({
        "id": id,
        "user_id": 2,
        "project_id": project_id,
        "username": "bob",
        "content": "Solid work",
        "rating": rating,
        "created_at": "2024-05-02T09:30:00Z",
    })
}
