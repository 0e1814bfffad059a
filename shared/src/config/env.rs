//! Environment variable helpers shared by the config loaders

use std::env;
use std::str::FromStr;

use super::ConfigError;

/// Parse `key` when set, `default` otherwise; a set but unparsable value is an error
pub(crate) fn parse_var<T: FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| invalid(key, &format!("cannot parse '{}'", raw))),
        Err(_) => Ok(default),
    }
}

/// String value of `key`, or `default`
pub(crate) fn string_var(key: &str, default: impl Into<String>) -> String {
    env::var(key).unwrap_or_else(|_| default.into())
}

pub(crate) fn invalid(key: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.to_string(),
    }
}
