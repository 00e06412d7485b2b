//! HTTP client library for the Vitrine showcase backend.
//!
//! Provides the abstract transport contract used by the state layer, a
//! `reqwest`-backed implementation, the typed endpoint wrapper, and the
//! error taxonomy with user-facing message normalization:
//!
//! - [`Transport`] — object-safe request/response seam (method, path,
//!   query, body in; status plus JSON body out).
//! - [`HttpTransport`] — production transport over [`reqwest`].
//! - [`VitrineApi`] — typed wrappers for every backend endpoint.
//! - [`ApiError`] / [`extract_error_message`] — failure classification and
//!   the single human-readable message derived from any failure shape.

pub mod api;
pub mod config;
pub mod error;
pub mod http;
pub mod transport;

pub use api::{TokenResponse, VitrineApi};
pub use config::{ClientConfig, LoginEncoding};
pub use error::{extract_error_message, ApiError, ErrorKind};
pub use http::HttpTransport;
pub use transport::{ApiRequest, Method, RawResponse, RequestBody, Transport, TransportError};
