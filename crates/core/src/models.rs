//! Wire models for the showcase backend.
//!
//! Every model is replaced wholesale from a server response; the client
//! never field-patches individual attributes. Field renames map the Rust
//! names onto the backend's JSON keys.

use serde::{Deserialize, Serialize};

use crate::types::{Id, Timestamp};

/// A user profile as returned by `/auth/me` and registration.
///
/// Immutable from the client's perspective: refreshed wholesale, never
/// patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Id,
    pub username: String,
    pub email: String,
    /// Account flag maintained by the backend.
    pub is_active: bool,
    pub created_at: Timestamp,
}

/// A showcased project.
///
/// Identity is `id`; all other fields may be refreshed wholesale.
/// `like_count` and `review_count` are server-maintained counters and are
/// never recomputed client-side. Endpoints that return bare project rows
/// (`/projects/my` and the create echo) omit the owner and counter fields,
/// which then fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: Id,
    pub title: String,
    pub description: String,
    #[serde(rename = "project_url")]
    pub url: String,
    #[serde(rename = "username", default)]
    pub owner_username: String,
    #[serde(rename = "likes_count", default)]
    pub like_count: i64,
    #[serde(rename = "reviews_count", default)]
    pub review_count: i64,
    pub created_at: Timestamp,
}

/// A review left on a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: Id,
    pub project_id: Id,
    #[serde(rename = "username")]
    pub author_username: String,
    pub content: String,
    /// Star rating in `1..=5`.
    pub rating: i32,
    pub created_at: Timestamp,
}

/// Aggregate platform totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_projects: i64,
    pub total_likes: i64,
    pub total_reviews: i64,
}

/// Payload of `GET /projects/analytics/top`: totals plus the server-ranked
/// top projects.
///
/// `top_projects` ordering is server-defined (likes, descending) and must
/// not be re-derived client-side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub top_projects: Vec<Project>,
    #[serde(flatten)]
    pub summary: AnalyticsSummary,
}
