//! Project collection state container.
//!
//! Owns the project collections, the caller's own projects, the
//! server-ranked top projects, and aggregate analytics. Fetches replace
//! collections wholesale with the server's ordering; the container never
//! re-sorts and never recomputes counters locally.
//!
//! Authenticated operations read the token from the shared [`TokenStore`]
//! at call time. A logout racing a pending mutation can therefore send a
//! request with a now-invalid token; the server is the authority that
//! rejects it, and the failure surfaces through the normal error path.

use std::sync::Arc;

use tokio::sync::watch;

use vitrine_client::VitrineApi;
use vitrine_core::models::{AnalyticsSummary, Project, Review};
use vitrine_core::types::Id;
use vitrine_core::validate;

use crate::error::StateError;
use crate::observe::StateCell;
use crate::store::TokenStore;

/// Observable snapshot of the project collections.
#[derive(Debug, Clone, Default)]
pub struct ProjectsSnapshot {
    /// Every project on the platform, newest first (server ordering).
    pub all: Vec<Project>,
    /// The caller's own projects.
    pub mine: Vec<Project>,
    /// Server-ranked top projects (by likes, descending).
    pub top_ranked: Vec<Project>,
    /// Aggregate platform totals, once fetched.
    pub analytics: Option<AnalyticsSummary>,
    /// True while a network call of the current operation is outstanding.
    pub busy: bool,
    /// Normalized message of the last failed operation.
    pub last_error: Option<String>,
}

/// The project collection container.
pub struct ProjectState {
    api: VitrineApi,
    tokens: Arc<dyn TokenStore>,
    cell: StateCell<ProjectsSnapshot>,
}

impl ProjectState {
    /// Create an empty container. Collections are populated by explicit
    /// fetch calls.
    pub fn new(api: VitrineApi, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            api,
            tokens,
            cell: StateCell::default(),
        }
    }

    /// Current committed snapshot.
    pub fn snapshot(&self) -> ProjectsSnapshot {
        self.cell.get()
    }

    /// Subscribe to committed collection changes.
    pub fn subscribe(&self) -> watch::Receiver<ProjectsSnapshot> {
        self.cell.subscribe()
    }

    /// Replace `all` wholesale with the server's current listing.
    ///
    /// Read policy: failures are recorded in `last_error` and the prior
    /// collection is left untouched.
    pub async fn fetch_all(&self) {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        match self.api.list_projects().await {
            Ok(projects) => self.cell.update(|s| s.all = projects),
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
            }
        }
        self.cell.update(|s| s.busy = false);
    }

    /// Replace `mine` wholesale with the caller's projects.
    pub async fn fetch_mine(&self) {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        match self.api.my_projects(&self.token()).await {
            Ok(projects) => self.cell.update(|s| s.mine = projects),
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
            }
        }
        self.cell.update(|s| s.busy = false);
    }

    /// Replace the analytics summary and `top_ranked` wholesale from the
    /// aggregate endpoint. Ranking is server-defined and not re-derived.
    pub async fn fetch_analytics(&self) {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        match self.api.analytics().await {
            Ok(analytics) => self.cell.update(|s| {
                s.analytics = Some(analytics.summary);
                s.top_ranked = analytics.top_projects;
            }),
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
            }
        }
        self.cell.update(|s| s.busy = false);
    }

    /// Create a project and prepend the server's canonical echo to both
    /// `all` and `mine`.
    ///
    /// The prepend happens only after the server confirms the record; a
    /// failed create never touches the collections.
    pub async fn create_project(
        &self,
        title: &str,
        description: &str,
        url: &str,
    ) -> Result<Project, StateError> {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        let result = self.create_project_inner(title, description, url).await;

        if let Err(e) = &result {
            let message = e.user_message();
            self.cell.update(|s| s.last_error = Some(message));
        }
        self.cell.update(|s| s.busy = false);

        result
    }

    async fn create_project_inner(
        &self,
        title: &str,
        description: &str,
        url: &str,
    ) -> Result<Project, StateError> {
        validate::validate_title(title)?;
        validate::validate_project_url(url)?;

        let project = self
            .api
            .create_project(&self.token(), title, description, url)
            .await?;

        tracing::info!(project_id = project.id, "Project created");
        let echoed = project.clone();
        self.cell.update(move |s| {
            s.all.insert(0, echoed.clone());
            s.mine.insert(0, echoed);
        });

        Ok(project)
    }

    /// Like a project, then re-fetch the full listing for authoritative
    /// counters.
    ///
    /// Counters are never incremented locally: if the like was already
    /// applied server-side (duplicate click), the re-fetch converges on
    /// the server's truth instead of drifting.
    pub async fn like_project(&self, project_id: Id) -> Result<(), StateError> {
        match self.api.like_project(&self.token(), project_id).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
                Err(e.into())
            }
        }
    }

    /// Remove a like, then re-fetch the full listing.
    pub async fn unlike_project(&self, project_id: Id) -> Result<(), StateError> {
        match self.api.unlike_project(&self.token(), project_id).await {
            Ok(()) => {
                self.fetch_all().await;
                Ok(())
            }
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
                Err(e.into())
            }
        }
    }

    /// Whether the caller has liked the project.
    ///
    /// Best-effort: any failure resolves to `false` so the like
    /// affordance is never blocked on an error.
    pub async fn check_liked(&self, project_id: Id) -> bool {
        self.api
            .check_liked(&self.token(), project_id)
            .await
            .unwrap_or(false)
    }

    /// Leave a review on a project.
    pub async fn create_review(
        &self,
        project_id: Id,
        content: &str,
        rating: i32,
    ) -> Result<Review, StateError> {
        let result = self.create_review_inner(project_id, content, rating).await;

        if let Err(e) = &result {
            let message = e.user_message();
            self.cell.update(|s| s.last_error = Some(message));
        }

        result
    }

    async fn create_review_inner(
        &self,
        project_id: Id,
        content: &str,
        rating: i32,
    ) -> Result<Review, StateError> {
        validate::validate_rating(rating)?;

        let review = self
            .api
            .create_review(&self.token(), project_id, content, rating)
            .await?;
        Ok(review)
    }

    /// Fetch a fresh snapshot of a project's reviews.
    ///
    /// The result is not cached or merged. On failure the error is
    /// recorded and an empty list returned; a project page is never
    /// blocked on its reviews.
    pub async fn fetch_reviews_for(&self, project_id: Id) -> Vec<Review> {
        match self.api.project_reviews(project_id).await {
            Ok(reviews) => reviews,
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
                Vec::new()
            }
        }
    }

    /// Token read from the shared store at call time. A missing token is
    /// sent as empty and rejected by the server, which stays the single
    /// authority on credential validity.
    fn token(&self) -> String {
        self.tokens.load().unwrap_or_default()
    }
}
