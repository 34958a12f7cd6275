//! Configuration types for the ZWatch client

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the monitoring service, without a trailing slash
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub storage: StorageKeys,
    /// How long an inline message stays visible
    #[serde(default = "default_notice_ttl", with = "humantime_serde")]
    pub notice_ttl: Duration,
    /// Pause between a successful login/register and the first timeline load
    #[serde(default = "default_auth_redirect_delay", with = "humantime_serde")]
    pub auth_redirect_delay: Duration,
    /// Pause between adding a site and reloading the timeline
    #[serde(default = "default_add_site_reload_delay", with = "humantime_serde")]
    pub add_site_reload_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            storage: StorageKeys::default(),
            notice_ttl: default_notice_ttl(),
            auth_redirect_delay: default_auth_redirect_delay(),
            add_site_reload_delay: default_add_site_reload_delay(),
        }
    }
}

impl ClientConfig {
    /// Replace the service base URL, dropping any trailing slash
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }
}

/// Keys under which the credential is kept in durable storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageKeys {
    #[serde(default = "default_identity_key")]
    pub identity_key: String,
    #[serde(default = "default_token_key")]
    pub token_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            identity_key: default_identity_key(),
            token_key: default_token_key(),
        }
    }
}

fn default_api_base() -> String {
    "http://localhost:3000".to_string()
}

fn default_identity_key() -> String {
    "zwatch_username".to_string()
}

fn default_token_key() -> String {
    "zwatch_token".to_string()
}

fn default_notice_ttl() -> Duration {
    Duration::from_secs(5)
}

fn default_auth_redirect_delay() -> Duration {
    Duration::from_millis(500)
}

fn default_add_site_reload_delay() -> Duration {
    Duration::from_secs(1)
}

/// Load configuration from a JSON file
pub fn load_config(path: &Path) -> crate::Result<ClientConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        crate::ZWatchError::Config(format!("Failed to read config file {:?}: {}", path, e))
    })?;
    let config: ClientConfig = serde_json::from_str(&content)?;
    Ok(config)
}
