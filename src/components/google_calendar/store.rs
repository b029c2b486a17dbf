use crate::error::{credentials_error, AppResult};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Access/refresh token pair with its expiry timestamp
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub access_token: String,
    pub refresh_token: Option<String>,
    /// Unix timestamp after which the access token is no longer valid
    pub expires_at: i64,
}

impl Credential {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now.timestamp()
    }
}

/// Persistence for the credential blob, injected so callers never touch the
/// filesystem directly
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn load(&self) -> AppResult<Option<Credential>>;
    async fn save(&self, credential: &Credential) -> AppResult<()>;
}

/// Credential store backed by a single JSON file
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> AppResult<Option<Credential>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            credentials_error(&format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        let credential = serde_json::from_str(&content)
            .map_err(|e| credentials_error(&format!("Failed to parse credential blob: {}", e)))?;

        Ok(Some(credential))
    }

    async fn save(&self, credential: &Credential) -> AppResult<()> {
        let content = serde_json::to_string(credential)?;

        fs::write(&self.path, content).map_err(|e| {
            credentials_error(&format!("Failed to write {}: {}", self.path.display(), e))
        })?;

        Ok(())
    }
}
