//! Session token storage.
//!
//! The token is opaque: presence means "logged in", nothing is decoded or
//! expiry-checked client-side. Storage sits behind the [`TokenStore`] trait
//! so the file-backed default can be swapped for an in-memory store in tests
//! (or a keyring later).

use crate::error::{ClientError, ClientResult};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

const SESSION_TOKEN_FILE: &str = "session-token";

/// Trait for session token storage.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn load(&self) -> ClientResult<Option<String>>;

    async fn save(&self, token: &str) -> ClientResult<()>;

    async fn clear(&self) -> ClientResult<()>;
}

/// In-memory implementation of [`TokenStore`].
pub struct InMemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }
}

impl Default for InMemoryTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn load(&self) -> ClientResult<Option<String>> {
        Ok(self.token.read().await.clone())
    }

    async fn save(&self, token: &str) -> ClientResult<()> {
        *self.token.write().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        *self.token.write().await = None;
        Ok(())
    }
}

/// File-backed [`TokenStore`] persisting the token across runs.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Store under the platform data directory, e.g.
    /// `~/.local/share/taskdeck/session-token`.
    pub fn new() -> ClientResult<Self> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| ClientError::ConfigError("no platform data directory".to_string()))?;
        Ok(Self::at_root(data_dir))
    }

    /// Store under an explicit root directory.
    pub fn at_root(root: impl AsRef<Path>) -> Self {
        Self {
            path: root.as_ref().join("taskdeck").join(SESSION_TOKEN_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn load(&self) -> ClientResult<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => {
                let token = contents.trim().to_string();
                Ok((!token.is_empty()).then_some(token))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, token: &str) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, token).await?;
        debug!(path = %self.path.display(), "persisted session token");
        Ok(())
    }

    async fn clear(&self) -> ClientResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Explicit session context passed to the clients.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self { store }
    }

    /// Ephemeral session for tests and one-shot commands.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryTokenStore::new()))
    }

    pub async fn token(&self) -> ClientResult<Option<String>> {
        self.store.load().await
    }

    pub async fn set_token(&self, token: &str) -> ClientResult<()> {
        self.store.save(token).await
    }

    pub async fn clear(&self) -> ClientResult<()> {
        self.store.clear().await
    }

    /// True iff a token is present. A failing store reads as logged out.
    pub async fn is_logged_in(&self) -> bool {
        match self.store.load().await {
            Ok(token) => token.is_some(),
            Err(e) => {
                warn!("session store read failed: {e}");
                false
            }
        }
    }
}
