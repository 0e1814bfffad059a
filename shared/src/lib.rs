//! Shared utilities and common types for the AuthKeep server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and environment loaders
//! - Error codes and error response structures
//! - Response envelopes returned by the HTTP layer

pub mod config;
pub mod errors;
pub mod types;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, DatabaseConfig, Environment, JwtConfig, LoggingConfig,
    ServerConfig, SessionConfig,
};
pub use errors::{error_codes, ErrorResponse, IntoErrorResponse};
pub use types::ApiResponse;
