//! Configuration for the authentication service

use std::time::Duration;

use ak_shared::config::SessionConfig;

/// Configuration for the authentication service
#[derive(Debug, Clone)]
pub struct AuthServiceConfig {
    /// Deadline applied to every individual store call
    pub store_timeout: Duration,
}

impl Default for AuthServiceConfig {
    fn default() -> Self {
        Self {
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&SessionConfig> for AuthServiceConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}
