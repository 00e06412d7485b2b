//! Client configuration loaded from environment variables.

use std::path::PathBuf;

/// How login credentials are encoded on the wire.
///
/// Both encodings exist in deployed backends; which one a given backend
/// accepts is a deployment property, not an API contract difference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginEncoding {
    /// `POST /auth/login` with a JSON body.
    Json,
    /// `POST /auth/login` with a form-urlencoded body.
    Form,
}

/// Configuration for the showcase client.
///
/// All fields have defaults suitable for a local backend.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (default: `http://localhost:8000`).
    pub base_url: String,
    /// Login credential encoding (default: JSON).
    pub login_encoding: LoginEncoding,
    /// Path of the persisted token file (default: `.vitrine/token`).
    pub token_file: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default                 |
    /// |------------------|-------------------------|
    /// | `API_BASE_URL`   | `http://localhost:8000` |
    /// | `LOGIN_ENCODING` | `json`                  |
    /// | `TOKEN_FILE`     | `.vitrine/token`        |
    ///
    /// # Panics
    ///
    /// Panics if `LOGIN_ENCODING` is set to anything other than `json` or
    /// `form`.
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("API_BASE_URL").unwrap_or_else(|_| "http://localhost:8000".into());

        let login_encoding = match std::env::var("LOGIN_ENCODING")
            .unwrap_or_else(|_| "json".into())
            .to_lowercase()
            .as_str()
        {
            "json" => LoginEncoding::Json,
            "form" => LoginEncoding::Form,
            other => panic!("LOGIN_ENCODING must be 'json' or 'form', got '{other}'"),
        };

        let token_file = std::env::var("TOKEN_FILE")
            .unwrap_or_else(|_| ".vitrine/token".into())
            .into();

        Self {
            base_url,
            login_encoding,
            token_file,
        }
    }
}
