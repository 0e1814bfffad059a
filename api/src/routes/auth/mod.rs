//! Authentication route handlers
//!
//! Thin adapters over `AuthService`: decode and validate the request,
//! call the service, map the outcome to HTTP.

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use actix_web::{http::header::USER_AGENT, HttpRequest};
use std::sync::Arc;

use ak_core::repositories::{SessionRepository, UserRepository};
use ak_core::services::auth::AuthService;

/// Application state that holds shared services
pub struct AppState<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub auth_service: Arc<AuthService<U, S>>,
}

impl<U, S> AppState<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(auth_service: Arc<AuthService<U, S>>) -> Self {
        Self { auth_service }
    }
}

/// `User-Agent` header, empty when absent or not valid text
pub(crate) fn user_agent(req: &HttpRequest) -> String {
    req.headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
