//! Deployment environment and the log level that goes with it

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::env::{invalid, string_var};
use super::ConfigError;

/// Where the service is running
///
/// Production turns on the strict secret checks in `AppConfig::validate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }

    pub fn is_development(&self) -> bool {
        matches!(self, Environment::Development)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }

    /// Read `ENVIRONMENT`, defaulting to development when unset
    ///
    /// An unrecognised value is an error rather than a silent fallback, so a
    /// misspelled production deployment cannot skip the production checks.
    pub fn from_env() -> Result<Self, ConfigError> {
        string_var("ENVIRONMENT", "development").parse()
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" | "stage" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(invalid(
                "ENVIRONMENT",
                &format!("unknown environment '{}'", other),
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Default filter handed to the logger when RUST_LOG is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self::for_environment(Environment::default())
    }
}

impl LoggingConfig {
    pub fn for_environment(env: Environment) -> Self {
        let level = match env {
            Environment::Development => "debug",
            Environment::Staging => "info",
            Environment::Production => "warn",
        };
        Self {
            level: level.to_string(),
        }
    }

    /// `LOG_LEVEL` overrides the environment default
    pub fn from_env(env: Environment) -> Self {
        let default = Self::for_environment(env);
        Self {
            level: string_var("LOG_LEVEL", default.level),
        }
    }
}
