//! Reactive state containers for the Vitrine client.
//!
//! This crate is the synchronization layer between view code and the
//! backend: two independently observable containers own all client state
//! and mediate every network interaction.
//!
//! - [`AuthState`] — credential token, current profile, auth-flow status.
//! - [`ProjectState`] — project collections, analytics, and mutations.
//! - [`StateCell`] — the observable-value primitive both containers are
//!   built on (commit-then-notify over a `tokio::sync::watch` channel).
//! - [`TokenStore`] — the single durable credential entry that survives
//!   process restarts.
//!
//! Containers are plain values constructed by the embedder and passed by
//! reference (`Arc`) wherever they are consumed; there is no global
//! singleton. Operations are async; overlapping calls are not coalesced
//! or cancelled; the last committed write wins.

pub mod auth;
pub mod error;
pub mod observe;
pub mod projects;
pub mod store;

pub use auth::{AuthState, SessionSnapshot};
pub use error::StateError;
pub use observe::StateCell;
pub use projects::{ProjectState, ProjectsSnapshot};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};

#[cfg(test)]
pub(crate) mod test_support;
