use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use ak_core::errors::{AuthError, DomainError};
use ak_shared::{error_codes, ErrorResponse, IntoErrorResponse};
use validator::ValidationErrors;

/// HTTP status for a domain error
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::AlreadyExists => StatusCode::CONFLICT,
            AuthError::InvalidCredentials
            | AuthError::TokenInvalid
            | AuthError::TokenExpired
            | AuthError::Unauthorized => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden => StatusCode::FORBIDDEN,
        },
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Handle domain errors and convert them to appropriate HTTP responses
///
/// Internal faults are logged with their full cause and answered with an
/// opaque 500.
pub fn handle_domain_error(error: DomainError) -> HttpResponse {
    if error.is_internal() {
        log::error!("Domain Error: {:?}", error);
    } else {
        log::debug!("Request rejected: {}", error);
    }

    HttpResponse::build(status_for(&error)).json(error.to_error_response())
}

/// 422 with the failing fields and their validation codes
pub fn handle_validation_error(errors: ValidationErrors) -> HttpResponse {
    let mut response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "Request validation failed");

    for (field, field_errors) in errors.field_errors() {
        let messages: Vec<String> = field_errors
            .iter()
            .map(|e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string())
            })
            .collect();
        response = response.add_detail(field.to_string(), messages);
    }

    HttpResponse::UnprocessableEntity().json(response)
}

/// Body for requests the gate turned away
pub fn unauthorized_response() -> HttpResponse {
    handle_domain_error(AuthError::Unauthorized.into())
}

/// Malformed or missing JSON bodies become 400s in the standard error shape
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("Rejected JSON payload: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::BAD_REQUEST,
        "Malformed request body",
    ));
    InternalError::from_response(err, response).into()
}
