//! Domain-specific error types and error handling.

mod types;


pub use types::{AuthError, StoreError, TokenError};

use ak_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use thiserror::Error;

/// Core domain errors
///
/// `Auth` carries the caller-visible outcome of an auth flow. Every other
/// variant is an internal fault: it is logged with its cause chain and
/// surfaces to clients only as an opaque server error.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Password hashing failed")]
    Hashing(#[source] bcrypt::BcryptError),

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    /// True for faults the caller can do nothing about
    pub fn is_internal(&self) -> bool {
        !matches!(self, DomainError::Auth(_))
    }

    /// The caller-visible auth outcome, if this is one
    pub fn as_auth(&self) -> Option<&AuthError> {
        match self {
            DomainError::Auth(err) => Some(err),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for DomainError {
    fn from(err: tokio::task::JoinError) -> Self {
        DomainError::Internal {
            message: format!("blocking task failed: {}", err),
        }
    }
}

/// Client-facing body; internal faults never expose their cause
impl IntoErrorResponse for DomainError {
    fn to_error_response(&self) -> ErrorResponse {
        let code = match self {
            DomainError::Auth(AuthError::AlreadyExists) => error_codes::CONFLICT,
            DomainError::Auth(AuthError::InvalidCredentials) => error_codes::INVALID_CREDENTIALS,
            DomainError::Auth(AuthError::TokenInvalid) => error_codes::TOKEN_INVALID,
            DomainError::Auth(AuthError::TokenExpired) => error_codes::TOKEN_EXPIRED,
            DomainError::Auth(AuthError::Unauthorized) => error_codes::UNAUTHORIZED,
            DomainError::Auth(AuthError::Forbidden) => error_codes::FORBIDDEN,
            _ => error_codes::INTERNAL_ERROR,
        };

        match self.as_auth() {
            Some(auth) => ErrorResponse::new(code, auth.to_string()),
            None => ErrorResponse::new(code, "An internal error occurred"),
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
