use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ak_core::domain::entities::ClientInfo;
use ak_core::repositories::{SessionRepository, UserRepository};
use ak_shared::ApiResponse;

use crate::dto::auth::RefreshRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_error};

use super::{user_agent, AppState};

/// Handler for POST /api/v1/auth/refresh
///
/// Exchanges a refresh token for a new access/refresh pair. The submitted
/// token is consumed and cannot be used again.
///
/// # Request Body
///
/// ```json
/// {
///     "refresh_token": "eyJ...",
///     "device_id": "laptop"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: `TOKEN_INVALID` for bad, unknown or consumed tokens,
///   `TOKEN_EXPIRED` when the session has expired
/// - 500 Internal Server Error: Store failure or timeout
pub async fn refresh<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<RefreshRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_error(errors);
    }

    let request = request.into_inner();
    let client = ClientInfo::new(request.device_id, user_agent(&req));

    match state
        .auth_service
        .refresh(&request.refresh_token, client)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok().json(ApiResponse::success(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
