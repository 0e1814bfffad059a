//! Authentication configuration: token signing, session lifetime, hashing cost

use super::env::{invalid, parse_var, string_var};
use super::ConfigError;
use serde::{Deserialize, Serialize};

const DEFAULT_ACCESS_SECRET: &str = "change-me-access-secret";
const DEFAULT_REFRESH_SECRET: &str = "change-me-refresh-secret";

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_SECONDS: i64 = 365 * 24 * 60 * 60;

/// JWT signing configuration
///
/// Access and refresh tokens are signed with independent secrets so a token
/// of one kind can never verify as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret key for signing access tokens
    pub access_secret: String,

    /// Secret key for signing refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    pub access_token_expiry: i64,

    /// Refresh token expiry time in seconds
    pub refresh_token_expiry: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: String::from(DEFAULT_ACCESS_SECRET),
            refresh_secret: String::from(DEFAULT_REFRESH_SECRET),
            access_token_expiry: 900,     // 15 minutes
            refresh_token_expiry: 604800, // 7 days
        }
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with both secrets
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            ..Default::default()
        }
    }

    /// Set access token expiry in seconds
    pub fn with_access_expiry(mut self, seconds: i64) -> Self {
        self.access_token_expiry = seconds;
        self
    }

    /// Set refresh token expiry in seconds
    pub fn with_refresh_expiry(mut self, seconds: i64) -> Self {
        self.refresh_token_expiry = seconds;
        self
    }

    /// Check if either secret is still the built-in placeholder
    pub fn is_using_default_secrets(&self) -> bool {
        self.access_secret == DEFAULT_ACCESS_SECRET || self.refresh_secret == DEFAULT_REFRESH_SECRET
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.access_secret.is_empty() || self.refresh_secret.is_empty() {
            return Err(ConfigError::Insecure("JWT secrets must not be empty".to_string()));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::Insecure(
                "access and refresh secrets must differ".to_string(),
            ));
        }
        for (key, ttl) in [
            ("JWT_ACCESS_TTL", self.access_token_expiry),
            ("JWT_REFRESH_TTL", self.refresh_token_expiry),
        ] {
            if ttl <= 0 {
                return Err(invalid(key, "must be positive"));
            }
            if ttl > MAX_TOKEN_TTL_SECONDS {
                return Err(invalid(key, "must not exceed one year"));
            }
        }
        Ok(())
    }
}

/// Session store and maintenance configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Deadline for a single session store call in milliseconds
    pub store_timeout_ms: u64,

    /// Interval between expired-session sweeps in seconds
    pub sweep_interval: u64,

    /// Whether the background sweeper runs at all
    pub sweep_enabled: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            store_timeout_ms: 5000,
            sweep_interval: 3600, // 1 hour
            sweep_enabled: true,
        }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session configuration
    #[serde(default)]
    pub session: SessionConfig,

    /// bcrypt work factor
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            session: SessionConfig::default(),
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}

impl AuthConfig {
    /// Create from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let jwt = JwtConfig {
            access_secret: string_var("JWT_ACCESS_SECRET", defaults.jwt.access_secret),
            refresh_secret: string_var("JWT_REFRESH_SECRET", defaults.jwt.refresh_secret),
            access_token_expiry: parse_var("JWT_ACCESS_TTL", defaults.jwt.access_token_expiry)?,
            refresh_token_expiry: parse_var("JWT_REFRESH_TTL", defaults.jwt.refresh_token_expiry)?,
        };

        let session = SessionConfig {
            store_timeout_ms: parse_var("STORE_TIMEOUT_MS", defaults.session.store_timeout_ms)?,
            sweep_interval: parse_var("SESSION_SWEEP_INTERVAL", defaults.session.sweep_interval)?,
            sweep_enabled: parse_var("SESSION_SWEEP_ENABLED", defaults.session.sweep_enabled)?,
        };

        Ok(Self {
            jwt,
            session,
            bcrypt_cost: parse_var("BCRYPT_COST", defaults.bcrypt_cost)?,
        })
    }

    /// Validate secrets, lifetimes and hashing cost
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.jwt.validate()?;
        if !(4..=31).contains(&self.bcrypt_cost) {
            return Err(invalid("BCRYPT_COST", "must be between 4 and 31"));
        }
        if self.session.store_timeout_ms == 0 {
            return Err(invalid("STORE_TIMEOUT_MS", "must be positive"));
        }
        if self.session.sweep_enabled && self.session.sweep_interval == 0 {
            return Err(invalid("SESSION_SWEEP_INTERVAL", "must be positive"));
        }
        Ok(())
    }
}

fn default_bcrypt_cost() -> u32 {
    12
}
