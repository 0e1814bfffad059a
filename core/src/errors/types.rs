//! Error kinds raised by the individual token lifecycle components

use std::time::Duration;
use thiserror::Error;

/// Caller-visible outcomes of the auth flows
///
/// Messages are deliberately coarse: they never say which check failed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("email already registered")]
    AlreadyExists,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("invalid refresh token")]
    TokenInvalid,

    #[error("refresh token expired")]
    TokenExpired,

    #[error("unauthorized")]
    Unauthorized,

    #[error("forbidden")]
    Forbidden,
}

/// Token codec failures
///
/// Expired, malformed, wrongly signed and wrong-kind tokens all collapse
/// into `VerificationFailed`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    #[error("token verification failed")]
    VerificationFailed,

    #[error("token signing failed")]
    SigningFailed,
}

/// Storage backend failures
#[derive(Error, Debug)]
pub enum StoreError {
    /// A unique key (token string, email) already exists
    #[error("conflict on {0}")]
    Conflict(String),

    /// The call did not finish within the configured store deadline
    #[error("store call exceeded deadline of {0:?}")]
    Timeout(Duration),

    #[error("database error: {message}")]
    Database { message: String },
}

impl StoreError {
    /// Wrap any backend error as a database fault
    pub fn database(err: impl std::fmt::Display) -> Self {
        StoreError::Database {
            message: err.to_string(),
        }
    }
}
