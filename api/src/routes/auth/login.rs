use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ak_core::domain::entities::ClientInfo;
use ak_core::repositories::{SessionRepository, UserRepository};
use ak_shared::ApiResponse;

use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_error};

use super::{user_agent, AppState};

/// Handler for POST /api/v1/auth/login
///
/// Opens a new session for `device_id`. The `User-Agent` header is stored
/// with the session.
///
/// ## Errors
/// - 401 Unauthorized: `invalid email or password`, whichever part was wrong
/// - 422 Unprocessable Entity: Field validation failed
pub async fn login<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<LoginRequest>,
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
        .login(&request.email, &request.password, client)
        .await
    {
        Ok(auth_response) => HttpResponse::Ok().json(ApiResponse::success(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
