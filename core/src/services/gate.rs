//! Request gate: turns an `Authorization` header into an authenticated identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::domain::entities::token::TokenKind;
use crate::errors::AuthError;
use crate::services::token::TokenService;

/// Identity bound to a request that passed the gate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user
    pub user_id: Uuid,
    /// ID of the access token that authenticated the request
    pub jti: String,
    /// When that access token stops being accepted
    pub expires_at: DateTime<Utc>,
}

/// Per-request authentication filter
///
/// Depends on the token codec only. Every failure collapses into
/// `AuthError::Unauthorized`.
#[derive(Clone)]
pub struct RequestGate {
    tokens: Arc<TokenService>,
}

impl RequestGate {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    /// Split `Bearer <token>` into the token
    ///
    /// The header must hold exactly two whitespace-separated parts and the
    /// scheme must be `bearer` in any letter case.
    pub fn extract_bearer(header: &str) -> Option<&str> {
        let mut parts = header.split_whitespace();
        let scheme = parts.next()?;
        let token = parts.next()?;
        if parts.next().is_some() || !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        Some(token)
    }

    /// Authenticate a request from its raw `Authorization` header value
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, AuthError> {
        let header = authorization.ok_or_else(|| {
            debug!("missing authorization header");
            AuthError::Unauthorized
        })?;

        let token = Self::extract_bearer(header).ok_or_else(|| {
            debug!("malformed authorization header");
            AuthError::Unauthorized
        })?;

        let claims = self
            .tokens
            .verify(token, TokenKind::Access)
            .map_err(|_| AuthError::Unauthorized)?;

        let user_id = claims.user_id().map_err(|_| AuthError::Unauthorized)?;

        Ok(AuthContext {
            user_id,
            expires_at: claims.expires_at(),
            jti: claims.jti,
        })
    }
}
