//! Bearer credential and its persisted storage.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::ApiResult;

/// Fixed key the admin token is stored under.
pub const TOKEN_KEY: &str = "admin_token";

/// Bearer token attached to requests. `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// `None` for empty or whitespace-only tokens.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        let trimmed = token.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }

    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Credential").field(&"<redacted>").finish()
    }
}

/// Persisted side of the credential lifecycle.
pub trait TokenStore: Send + Sync {
    fn load(&self) -> ApiResult<Option<Credential>>;
    fn save(&self, credential: &Credential) -> ApiResult<()>;
    fn clear(&self) -> ApiResult<()>;
}

/// Token kept in a file named [`TOKEN_KEY`].
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<config dir>/companion/admin_token`.
    pub fn default_location() -> Self {
        Self::new(default_token_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("companion")
        .join(TOKEN_KEY)
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> ApiResult<Option<Credential>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Credential::new(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, credential: &Credential) -> ApiResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, credential.token())?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))?;
        }
        log::debug!("saved token to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-process token store.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<Credential>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Credential>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> ApiResult<Option<Credential>> {
        Ok(self.slot().clone())
    }

    fn save(&self, credential: &Credential) -> ApiResult<()> {
        *self.slot() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> ApiResult<()> {
        *self.slot() = None;
        Ok(())
    }
}
