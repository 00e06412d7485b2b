//! Pre-flight validation for project submissions and reviews.
//!
//! The backend re-validates everything; these checks reject obviously
//! malformed input before spending a network round trip.

use crate::error::CoreError;

/// Minimum allowed review rating.
pub const MIN_RATING: i32 = 1;

/// Maximum allowed review rating.
pub const MAX_RATING: i32 = 5;

/// Maximum length for a project title.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Validate that a review rating is within the accepted range.
pub fn validate_rating(rating: i32) -> Result<(), CoreError> {
    if (MIN_RATING..=MAX_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Rating must be between {MIN_RATING} and {MAX_RATING}, got {rating}"
        )))
    }
}

/// Validate that a project URL is non-empty and uses an http(s) scheme.
pub fn validate_project_url(url: &str) -> Result<(), CoreError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Project URL must not be empty".to_string(),
        ));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(CoreError::Validation(format!(
            "Project URL must start with http:// or https://, got: '{trimmed}'"
        )));
    }
    Ok(())
}

/// Validate that a project title is non-empty and within length bounds.
pub fn validate_title(title: &str) -> Result<(), CoreError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(
            "Title must not be empty".to_string(),
        ));
    }
    if trimmed.len() > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title exceeds maximum length of {MAX_TITLE_LENGTH} characters"
        )));
    }
    Ok(())
}
