//! Headless showcase client.
//!
//! Wires the state containers against a live backend: rehydrates the
//! persisted token, optionally logs in with credentials from the
//! environment, then runs one fetch pass over projects and analytics and
//! reports the results through tracing.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine_client::{ClientConfig, HttpTransport, VitrineApi};
use vitrine_state::{AuthState, FileTokenStore, ProjectState, TokenStore};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitrine=info,vitrine_state=debug,vitrine_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Loaded client configuration");

    // --- Containers ---
    let transport = Arc::new(HttpTransport::new(config.base_url.clone()));
    let api = VitrineApi::new(transport, config.login_encoding);
    let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(config.token_file.clone()));

    let auth = AuthState::new(api.clone(), Arc::clone(&tokens));
    let projects = ProjectState::new(api, tokens);

    // --- Session ---
    auth.rehydrate().await;

    if !auth.snapshot().is_authenticated() {
        if let (Ok(username), Ok(password)) = (
            std::env::var("VITRINE_USERNAME"),
            std::env::var("VITRINE_PASSWORD"),
        ) {
            if let Err(e) = auth.login(&username, &password).await {
                tracing::warn!(error = %e, "Login failed");
            }
        }
    }

    let session = auth.snapshot();
    match &session.user {
        Some(user) => tracing::info!(username = %user.username, "Authenticated"),
        None => tracing::info!("Browsing anonymously"),
    }

    // --- Fetch pass ---
    projects.fetch_all().await;
    projects.fetch_analytics().await;
    if session.is_authenticated() {
        projects.fetch_mine().await;
    }

    let snapshot = projects.snapshot();
    if let Some(error) = &snapshot.last_error {
        tracing::warn!(%error, "Fetch pass ended with an error");
    }

    tracing::info!(
        projects = snapshot.all.len(),
        mine = snapshot.mine.len(),
        "Project listing loaded"
    );

    if let Some(summary) = snapshot.analytics {
        tracing::info!(
            total_projects = summary.total_projects,
            total_likes = summary.total_likes,
            total_reviews = summary.total_reviews,
            "Platform analytics"
        );
    }

    for project in snapshot.top_ranked.iter().take(3) {
        tracing::info!(
            title = %project.title,
            likes = project.like_count,
            owner = %project.owner_username,
            "Top project"
        );
    }
}
