use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ak_core::domain::entities::ClientInfo;
use ak_core::repositories::{SessionRepository, UserRepository};
use ak_shared::ApiResponse;

use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, handle_validation_error};

use super::{user_agent, AppState};

/// Handler for POST /api/v1/auth/register
///
/// Creates the account and opens its first session.
///
/// # Request Body
///
/// ```json
/// {
///     "name": "Ada Lovelace",
///     "email": "ada@example.com",
///     "password": "correct-horse",
///     "device_id": "laptop"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `{ "success": true, "data": AuthResponse, "timestamp": ... }`
///
/// ## Errors
/// - 409 Conflict: Email already registered
/// - 422 Unprocessable Entity: Field validation failed
pub async fn register<U, S>(
    req: HttpRequest,
    state: web::Data<AppState<U, S>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    if let Err(errors) = request.validate() {
        return handle_validation_error(errors);
    }

    let request = request.into_inner();
    let client = ClientInfo::for_registration(request.device_id, user_agent(&req));

    match state
        .auth_service
        .register(&request.name, &request.email, &request.password, client)
        .await
    {
        Ok(auth_response) => HttpResponse::Created().json(ApiResponse::success(auth_response)),
        Err(error) => handle_domain_error(error),
    }
}
