#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::api_client::DEFAULT_API_URL;
use crate::domain::ports::{ConfigProvider, RetryPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use std::path::PathBuf;
use std::time::Duration;
use toml_config::TomlConfig;

pub const API_URL_ENV: &str = "ASTRO_API_URL";

/// Values given explicitly on the command line; they win over every other layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub api_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub max_retries: Option<u32>,
    pub session_path: Option<String>,
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PortalConfig {
    pub api_base_url: String,
    pub timeout: Option<Duration>,
    pub retry: RetryPolicy,
    pub session_path: String,
}

fn default_session_path() -> String {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home)
            .join(".astro-portal")
            .join("session.json")
            .to_string_lossy()
            .into_owned(),
        Err(_) => ".astro-portal-session.json".to_string(),
    }
}

impl PortalConfig {
    /// Layers, highest first: overrides, config file, `ASTRO_API_URL`, defaults.
    pub fn resolve(overrides: ConfigOverrides, file: Option<&TomlConfig>) -> Self {
        let api_base_url = overrides
            .api_url
            .or_else(|| file.and_then(|f| f.api.base_url.clone()))
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let timeout = overrides
            .timeout_seconds
            .or_else(|| file.and_then(|f| f.api.timeout_seconds))
            .map(Duration::from_secs);

        let file_retry = file.and_then(|f| f.retry.as_ref());
        let mut retry = RetryPolicy::default();
        if let Some(section) = file_retry {
            retry.max_retries = section.max_retries;
            if let Some(ms) = section.base_delay_ms {
                retry.base_delay = Duration::from_millis(ms);
            }
        }
        if let Some(max_retries) = overrides.max_retries {
            retry.max_retries = max_retries;
        }

        let session_path = overrides
            .session_path
            .or_else(|| file.and_then(|f| f.session.as_ref().map(|s| s.path.clone())))
            .unwrap_or_else(default_session_path);

        Self {
            api_base_url,
            timeout,
            retry,
            session_path,
        }
    }
}

impl ConfigProvider for PortalConfig {
    fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    fn session_path(&self) -> &str {
        &self.session_path
    }
}

impl Validate for PortalConfig {
    fn validate(&self) -> Result<()> {
        validate_url("api_url", &self.api_base_url)?;
        validate_range("max_retries", self.retry.max_retries, 0, 5)?;
        validate_path("session_path", &self.session_path)?;
        Ok(())
    }
}
