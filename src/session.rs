//! Login and token storage.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{Credentials, TestBackend};
use crate::error::WizardError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
struct SessionFile {
    user_id: String,
    token: String,
}

/// Token persisted between runs of the CLI.
#[derive(Debug, Clone)]
pub struct Session {
    path: PathBuf,
}

impl Session {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Log in and persist the token. Blank credentials fail before any call.
    pub async fn login<B: TestBackend + ?Sized>(
        &self,
        backend: &B,
        credentials: &Credentials,
    ) -> Result<String, WizardError> {
        if credentials.user_id.trim().is_empty() {
            return Err(WizardError::Validation("User ID is required".to_string()));
        }
        if credentials.password.is_empty() {
            return Err(WizardError::Validation("Password is required".to_string()));
        }

        let token = backend.login(credentials).await?;
        self.save(&credentials.user_id, &token)?;
        info!(user_id = %credentials.user_id, "Logged in");
        Ok(token)
    }

    /// Stored token, if any. An unreadable file counts as logged out.
    pub fn token(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        match toml::from_str::<SessionFile>(&raw) {
            Ok(file) => Some(file.token),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "Ignoring malformed session file");
                None
            }
        }
    }

    pub fn logout(&self) -> std::io::Result<()> {
        match std::fs::remove_file(&self.path) {
            Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn save(&self, user_id: &str, token: &str) -> Result<(), WizardError> {
        let file = SessionFile {
            user_id: user_id.to_string(),
            token: token.to_string(),
        };
        let write = || -> std::io::Result<()> {
            if let Some(dir) = self.path.parent() {
                std::fs::create_dir_all(dir)?;
            }
            let body = toml::to_string(&file)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(&self.path, body)
        };
        write().map_err(|source| WizardError::Session {
            path: self.path.clone(),
            source,
        })
    }
}
