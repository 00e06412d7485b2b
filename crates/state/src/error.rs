//! Container-level error type.

use vitrine_client::ApiError;
use vitrine_core::CoreError;

/// Failure of a container operation.
///
/// Mutation operations record the normalized message in the container's
/// `last_error` and then return this error so callers can chain (for
/// example register-then-login). Read operations swallow it.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Client-side validation rejected the input before any request was
    /// sent.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// The backend or transport failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl StateError {
    /// The single human-readable message stored in `last_error`.
    pub fn user_message(&self) -> String {
        match self {
            Self::Invalid(CoreError::Validation(message)) => message.clone(),
            Self::Api(error) => error.user_message(),
        }
    }
}
