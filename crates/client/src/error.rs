//! Failure classification and user-facing message normalization.
//!
//! Every backend or transport failure is ultimately collapsed into a
//! single human-readable string for display. [`extract_error_message`] is
//! total: whatever shape the backend produced (structured `detail` arrays,
//! plain strings, empty objects, no body at all), it returns a non-empty
//! message and never fails.

use serde_json::Value;

/// Fallback message when nothing better can be extracted.
pub const GENERIC_ERROR: &str = "Something went wrong";

/// Fallback for structured validation details without a usable message.
const GENERIC_VALIDATION: &str = "Validation error";

/// Broad classification of a backend rejection, derived from the HTTP
/// status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Field-level validation failure (422).
    Validation,
    /// Invalid credentials or an expired/rejected token (401, 403).
    Auth,
    /// Duplicate identity or an already-applied mutation (400).
    Conflict,
    /// Missing entity (404).
    NotFound,
    /// Anything else.
    Unknown,
}

impl ErrorKind {
    /// Classify an HTTP status code.
    ///
    /// The mapping follows the backend's actual status usage: duplicates
    /// (registration, repeat likes) arrive as 400, auth failures as
    /// 401/403, and field validation as 422.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => Self::Conflict,
            401 | 403 => Self::Auth,
            404 => Self::NotFound,
            422 => Self::Validation,
            _ => Self::Unknown,
        }
    }
}

/// Errors from the backend API layer.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The request never reached the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// The backend rejected the request with a non-success status.
    #[error("request rejected with status {status}")]
    Rejected {
        status: u16,
        kind: ErrorKind,
        /// Parsed response body, when one was present and was valid JSON.
        body: Option<Value>,
    },

    /// A success response whose body did not match the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Collapse this failure into the single message shown to users.
    pub fn user_message(&self) -> String {
        match self {
            Self::Transport(message) | Self::Decode(message) => {
                extract_error_message(None, Some(message))
            }
            Self::Rejected { body, .. } => extract_error_message(body.as_ref(), None),
        }
    }
}

/// Derive a non-empty human-readable message from an arbitrary failure.
///
/// Preference order:
/// 1. the body's `detail` field: an array yields the first element's
///    `msg` (or "Validation error"), a non-empty string is used verbatim;
/// 2. the transport's own message, when non-empty;
/// 3. a generic fallback.
///
/// Total by construction: no input shape can make it fail.
pub fn extract_error_message(body: Option<&Value>, fallback: Option<&str>) -> String {
    if let Some(detail) = body.and_then(|b| b.get("detail")) {
        match detail {
            Value::String(s) if !s.is_empty() => return s.clone(),
            Value::Array(items) => {
                return items
                    .first()
                    .and_then(|item| item.get("msg"))
                    .and_then(Value::as_str)
                    .unwrap_or(GENERIC_VALIDATION)
                    .to_string();
            }
            // Other shapes (objects, numbers, empty strings) carry no
            // usable message; fall through to the fallback chain.
            _ => {}
        }
    }

    match fallback {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => GENERIC_ERROR.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_body_falls_back_to_transport_message() {
        assert_eq!(
            extract_error_message(None, Some("connection refused")),
            "connection refused"
        );
    }

    #[test]
    fn no_body_no_message_yields_generic() {
        assert_eq!(extract_error_message(None, None), GENERIC_ERROR);
        assert_eq!(extract_error_message(None, Some("")), GENERIC_ERROR);
    }

    #[test]
    fn string_detail_used_verbatim() {
        let body = json!({"detail": "Incorrect username or password"});
        assert_eq!(
            extract_error_message(Some(&body), None),
            "Incorrect username or password"
        );
    }

    #[test]
    fn array_detail_uses_first_msg() {
        let body = json!({"detail": [
            {"loc": ["body", "email"], "msg": "value is not a valid email address"},
            {"loc": ["body", "username"], "msg": "field required"},
        ]});
        assert_eq!(
            extract_error_message(Some(&body), None),
            "value is not a valid email address"
        );
    }

    #[test]
    fn empty_array_detail_yields_validation_fallback() {
        let body = json!({"detail": []});
        assert_eq!(extract_error_message(Some(&body), None), GENERIC_VALIDATION);
    }

    #[test]
    fn array_detail_without_msg_yields_validation_fallback() {
        let body = json!({"detail": [{"loc": ["body"]}]});
        assert_eq!(extract_error_message(Some(&body), None), GENERIC_VALIDATION);
    }

    #[test]
    fn empty_object_body_yields_generic() {
        let body = json!({});
        assert_eq!(extract_error_message(Some(&body), None), GENERIC_ERROR);
    }

    #[test]
    fn unusable_detail_shapes_fall_through() {
        for body in [json!({"detail": {}}), json!({"detail": 42}), json!({"detail": ""})] {
            assert_eq!(extract_error_message(Some(&body), None), GENERIC_ERROR);
        }
    }

    #[test]
    fn status_classification() {
        assert_eq!(ErrorKind::from_status(400), ErrorKind::Conflict);
        assert_eq!(ErrorKind::from_status(401), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(403), ErrorKind::Auth);
        assert_eq!(ErrorKind::from_status(404), ErrorKind::NotFound);
        assert_eq!(ErrorKind::from_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::from_status(500), ErrorKind::Unknown);
    }

    #[test]
    fn rejected_error_message_prefers_detail() {
        let error = ApiError::Rejected {
            status: 401,
            kind: ErrorKind::Auth,
            body: Some(json!({"detail": "Invalid token"})),
        };
        assert_eq!(error.user_message(), "Invalid token");
    }

    #[test]
    fn transport_error_message_is_its_own() {
        let error = ApiError::Transport("dns lookup failed".to_string());
        assert_eq!(error.user_message(), "dns lookup failed");
    }

    #[test]
    fn rejected_without_body_yields_generic() {
        let error = ApiError::Rejected {
            status: 500,
            kind: ErrorKind::Unknown,
            body: None,
        };
        assert_eq!(error.user_message(), GENERIC_ERROR);
    }
}
