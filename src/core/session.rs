use crate::core::api_client::ApiClient;
use crate::domain::model::AuthToken;
use crate::domain::ports::{ConfigProvider, SessionStore};
use crate::utils::error::{PortalError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Auth state for one user. Passed by reference to whatever issues requests;
/// loaded and saved explicitly by the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<AuthToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<Value>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.user
            .as_ref()
            .and_then(|u| u.get("role"))
            .and_then(Value::as_str)
            == Some("admin")
    }

    pub fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Token or the mandatory-login error.
    pub fn require_token(&self) -> Result<&AuthToken> {
        self.token.as_ref().ok_or_else(|| PortalError::AuthRequired {
            message: "no session token; log in first".to_string(),
        })
    }

    pub async fn login(&mut self, client: &ApiClient, username: &str, password: &str) -> Result<()> {
        let tokens = client
            .login(username, password)
            .await
            .into_result()
            .map_err(|message| PortalError::AuthFailed { message })?;

        let token = AuthToken::new(tokens.access_token);
        let user = client
            .current_user(&token)
            .await
            .into_result()
            .map_err(|message| PortalError::AuthFailed { message })?;

        tracing::info!("Logged in as {}", username);
        self.token = Some(token);
        self.user = Some(user);
        Ok(())
    }

    /// Re-fetches the current user; an invalid token is dropped from the session.
    pub async fn verify(&mut self, client: &ApiClient) -> bool {
        let Some(token) = self.token.clone() else {
            return false;
        };

        match client.current_user(&token).await.into_result() {
            Ok(user) => {
                self.user = Some(user);
                true
            }
            Err(error) => {
                tracing::info!("Stored token rejected ({}), clearing session", error);
                self.logout();
                false
            }
        }
    }

    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
    }
}

/// JSON file holding the session between runs.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self::new(config.session_path())
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Session> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Session::default()),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, data).await?;
        tracing::debug!("Session saved to {}", self.path.display());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
