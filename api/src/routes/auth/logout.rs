use actix_web::{web, HttpRequest, HttpResponse};

use ak_core::repositories::{SessionRepository, UserRepository};

use crate::dto::auth::{LogoutQuery, MessageResponse};
use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::Authenticated;

use super::AppState;

/// Header carrying the refresh token to revoke on single-device logout
pub const REFRESH_TOKEN_HEADER: &str = "X-Refresh-Token";

/// Handler for POST /api/v1/auth/logout
///
/// Requires a bearer access token. With `?all_devices=true` every session
/// of the caller is revoked; otherwise only the session whose refresh token
/// is sent in `X-Refresh-Token`. Idempotent.
///
/// ## Errors
/// - 401 Unauthorized: Missing or invalid access token
/// - 500 Internal Server Error: Store failure or timeout
pub async fn logout<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    auth: Authenticated,
    query: web::Query<LogoutQuery>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    let refresh_token = req
        .headers()
        .get(REFRESH_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok());

    match state
        .auth_service
        .logout(auth.user_id, refresh_token, query.all_devices)
        .await
    {
        Ok(()) => HttpResponse::Ok().json(MessageResponse::new("Logged out successfully")),
        Err(error) => handle_domain_error(error),
    }
}
