//! Authentication state container.
//!
//! Owns the credential token, the current user profile, and
//! authentication-flow status. The token is the only durable piece of
//! state: it is loaded from the [`TokenStore`] at construction and stays
//! provisional until [`AuthState::rehydrate`] (or a login) validates it
//! against `/auth/me`. A token that cannot be validated never remains
//! persisted.
//!
//! Overlapping operations are not coalesced or cancelled; the last
//! committed write to the snapshot wins.

use std::sync::Arc;

use tokio::sync::watch;

use vitrine_client::VitrineApi;
use vitrine_core::models::Profile;

use crate::error::StateError;
use crate::observe::StateCell;
use crate::store::TokenStore;

/// Observable snapshot of the authentication session.
#[derive(Debug, Clone, Default)]
pub struct SessionSnapshot {
    /// Credential for authenticated calls. Presence alone does not mean
    /// the session is valid; see [`is_authenticated`](Self::is_authenticated).
    pub token: Option<String>,
    /// Profile of the validated user.
    pub user: Option<Profile>,
    /// True while a network call of the current operation is outstanding.
    pub busy: bool,
    /// Normalized message of the last failed operation.
    pub last_error: Option<String>,
}

impl SessionSnapshot {
    /// Whether the session holds a validated identity.
    ///
    /// Defined over `user`, not `token`: a stored token is provisional
    /// until a profile fetch confirmed it.
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

/// The authentication container.
pub struct AuthState {
    api: VitrineApi,
    tokens: Arc<dyn TokenStore>,
    cell: StateCell<SessionSnapshot>,
}

impl AuthState {
    /// Create the container, loading any persisted token.
    ///
    /// The loaded token is provisional; call [`rehydrate`](Self::rehydrate)
    /// once at startup to validate it.
    pub fn new(api: VitrineApi, tokens: Arc<dyn TokenStore>) -> Self {
        let token = tokens.load();
        let cell = StateCell::new(SessionSnapshot {
            token,
            ..Default::default()
        });
        Self { api, tokens, cell }
    }

    /// Current committed snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.cell.get()
    }

    /// Subscribe to committed session changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.cell.subscribe()
    }

    /// Create a new account.
    ///
    /// Does not authenticate and does not touch the token: callers chain
    /// a [`login`](Self::login) afterwards.
    pub async fn register(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<Profile, StateError> {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        let result = self.api.register(email, username, password).await;

        match &result {
            Ok(_) => tracing::info!(username, "Account registered"),
            Err(e) => {
                let message = e.user_message();
                self.cell.update(|s| s.last_error = Some(message));
            }
        }
        self.cell.update(|s| s.busy = false);

        result.map_err(StateError::from)
    }

    /// Exchange credentials for a token, persist it, and validate the
    /// identity.
    ///
    /// If the identity validation fails the whole operation fails and the
    /// token is discarded again: login never leaves a token persisted
    /// without a validated profile.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), StateError> {
        self.cell.update(|s| {
            s.busy = true;
            s.last_error = None;
        });

        let result = self.login_inner(username, password).await;

        if let Err(e) = &result {
            let message = e.user_message();
            self.cell.update(|s| s.last_error = Some(message));
        }
        self.cell.update(|s| s.busy = false);

        result
    }

    async fn login_inner(&self, username: &str, password: &str) -> Result<(), StateError> {
        let token = self.api.login(username, password).await?.access_token;

        self.tokens.save(&token);
        self.cell.update(|s| s.token = Some(token.clone()));

        match self.api.current_user(&token).await {
            Ok(profile) => {
                tracing::info!(username, "Logged in");
                self.cell.update(|s| s.user = Some(profile));
                Ok(())
            }
            Err(e) => {
                // The freshly persisted token is unusable; drop it.
                self.logout();
                Err(e.into())
            }
        }
    }

    /// Validate the stored token by fetching the profile.
    ///
    /// On success the profile is replaced wholesale. Any failure is fatal
    /// to the session: the token is discarded and the container returns
    /// to anonymous without recording an error. This is the only path
    /// that clears a token the user did not explicitly discard.
    pub async fn refresh_identity(&self) {
        let Some(token) = self.cell.get().token else {
            return;
        };

        match self.api.current_user(&token).await {
            Ok(profile) => self.cell.update(|s| s.user = Some(profile)),
            Err(e) => {
                tracing::warn!(error = %e, "Identity validation failed, clearing session");
                self.logout();
            }
        }
    }

    /// Startup path: validate a persisted token, if one was loaded.
    pub async fn rehydrate(&self) {
        self.refresh_identity().await;
    }

    /// Drop the session.
    ///
    /// Synchronous, always succeeds, performs no network I/O. Clears the
    /// token, the user, the error, and the persisted credential.
    pub fn logout(&self) {
        self.tokens.clear();
        self.cell.update(|s| {
            s.token = None;
            s.user = None;
            s.last_error = None;
        });
    }
}
