//! Durable credential storage.
//!
//! Exactly one value survives the process: the access token. It is
//! written on successful login, removed on logout or failed identity
//! validation, and read back at process start. [`TokenStore`] abstracts
//! where it lives so the containers can be exercised against an
//! in-memory store in tests.

use std::path::PathBuf;
use std::sync::Mutex;

/// Storage for the single persisted credential.
///
/// All operations are synchronous and infallible from the caller's point
/// of view: `logout` must never block on I/O or fail, so implementations
/// treat storage errors as best-effort and log them.
pub trait TokenStore: Send + Sync {
    /// The currently persisted token, if any.
    fn load(&self) -> Option<String>;

    /// Persist `token`, replacing any previous value.
    fn save(&self, token: &str);

    /// Remove the persisted token.
    fn clear(&self);
}

/// Token store backed by a single file on disk.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Create a store persisting to `path`. Parent directories are
    /// created on first save.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let contents = std::fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    }

    fn save(&self, token: &str) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = std::fs::create_dir_all(parent) {
                    tracing::warn!(error = %e, path = %self.path.display(), "Failed to create token directory");
                    return;
                }
            }
        }
        if let Err(e) = std::fs::write(&self.path, token) {
            tracing::warn!(error = %e, path = %self.path.display(), "Failed to persist token");
        }
    }

    fn clear(&self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(error = %e, path = %self.path.display(), "Failed to remove token");
            }
        }
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with `token`, as if a previous session had
    /// persisted it.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Mutex::new(Some(token.to_string())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.lock().expect("token lock poisoned").clone()
    }

    fn save(&self, token: &str) {
        *self.token.lock().expect("token lock poisoned") = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().expect("token lock poisoned") = None;
    }
}
