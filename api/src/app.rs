//! Application factory
//!
//! Wires the shared state, the request gate and the routes into an
//! Actix-web application.

use actix_web::{middleware::Logger, web, App, HttpResponse};

use crate::handlers::error::json_error_handler;
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    login::login, logout::logout, refresh::refresh, register::register, AppState,
};
use crate::routes::me::me;

use ak_core::repositories::{SessionRepository, UserRepository};
use ak_core::services::gate::RequestGate;
use ak_shared::{error_codes, ErrorResponse};

/// Create and configure the application with all dependencies
pub fn create_app<U, S>(
    app_state: web::Data<AppState<U, S>>,
    gate: web::Data<RequestGate>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    S: SessionRepository + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(gate)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(register::<U, S>))
                        .route("/login", web::post().to(login::<U, S>))
                        .route("/refresh", web::post().to(refresh::<U, S>))
                        .service(
                            web::resource("/logout")
                                .wrap(JwtAuth::new())
                                .route(web::post().to(logout::<U, S>)),
                        ),
                )
                .service(
                    web::resource("/me")
                        .wrap(JwtAuth::new())
                        .route(web::get().to(me)),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "authkeep-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
