use crate::core::session::Session;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Retry behaviour for backend calls. The default never retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::from_secs(1),
        }
    }
}

pub trait ConfigProvider: Send + Sync {
    fn api_base_url(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn retry_policy(&self) -> RetryPolicy;
    fn session_path(&self) -> &str;
}

/// Persistence for the auth session between process runs.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Session>;
    async fn save(&self, session: &Session) -> Result<()>;
    async fn clear(&self) -> Result<()>;
}
