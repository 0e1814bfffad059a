//! Integration tests for the bearer authentication middleware

mod common;

use actix_web::{http::header::AUTHORIZATION, http::StatusCode, test, web, App, HttpResponse};
use chrono::{Duration, Utc};
use serde_json::Value;
use uuid::Uuid;

use ak_api::app::create_app;
use ak_api::middleware::auth::{Authenticated, JwtAuth};
use ak_core::domain::entities::TokenKind;
use ak_core::services::{RequestGate, TokenService, TokenServiceConfig};
use common::*;

async fn protected_handler(auth: Authenticated) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "user_id": auth.user_id.to_string(),
        "jti": auth.jti,
    }))
}

#[actix_web::test]
async fn test_middleware_requires_auth_header() {
    let ctx = setup();
    let app = test::init_service(
        App::new()
            .app_data(ctx.gate.clone())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "UNAUTHORIZED");
}

#[actix_web::test]
async fn test_middleware_rejects_invalid_token() {
    let ctx = setup();
    let app = test::init_service(
        App::new()
            .app_data(ctx.gate.clone())
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    for header in ["Bearer invalid-token", "Basic dXNlcjpwYXNz", "Bearer", "Bearer a b"] {
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header((AUTHORIZATION, header))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED, "header: {}", header);
    }
}

#[actix_web::test]
async fn test_middleware_binds_identity() {
    let ctx = setup();
    let user_id = Uuid::new_v4();
    let access = ctx.tokens.issue(user_id, TokenKind::Access).unwrap();

    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::with_gate(RequestGate::new(ctx.tokens.clone())))
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    // Scheme is matched case-insensitively
    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header((AUTHORIZATION, format!("bearer {}", access.token)))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["user_id"], user_id.to_string());
    assert_eq!(body["jti"], access.claims.jti);
}

#[actix_web::test]
async fn test_refresh_token_is_not_a_bearer_credential() {
    let ctx = setup();
    let refresh = ctx.tokens.issue(Uuid::new_v4(), TokenKind::Refresh).unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.gate.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&refresh.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_access_token_signed_with_refresh_secret_is_rejected() {
    let ctx = setup();
    let forger = TokenService::new(TokenServiceConfig::new(REFRESH_SECRET, ACCESS_SECRET));
    let forged = forger.issue(Uuid::new_v4(), TokenKind::Access).unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.gate.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&forged.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_expired_access_token_is_rejected() {
    let ctx = setup();
    let stale = ctx
        .tokens
        .issue_at(Uuid::new_v4(), TokenKind::Access, Utc::now() - Duration::hours(1))
        .unwrap();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.gate.clone())).await;

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&stale.token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_me_returns_bound_identity() {
    let ctx = setup();
    let app = test::init_service(create_app(ctx.state.clone(), ctx.gate.clone())).await;

    let body: Value = test::call_and_read_body_json(
        &app,
        register_request("me@example.com", "laptop").to_request(),
    )
    .await;
    let user_id = body["data"]["user"]["id"].clone();
    let (access_token, _) = token_pair(&body);

    let req = test::TestRequest::get()
        .uri("/api/v1/me")
        .insert_header(bearer(&access_token))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user_id"], user_id);
}

#[actix_web::test]
async fn test_auth_context_extractor_without_middleware() {
    let app = test::init_service(App::new().route("/protected", web::get().to(protected_handler))).await;

    let req = test::TestRequest::get().uri("/protected").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "INTERNAL_ERROR");
}

#[actix_web::test]
async fn test_middleware_without_gate_is_server_error() {
    let app = test::init_service(
        App::new()
            .wrap(JwtAuth::new())
            .route("/protected", web::get().to(protected_handler)),
    )
    .await;

    let req = test::TestRequest::get()
        .uri("/protected")
        .insert_header((AUTHORIZATION, "Bearer anything"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
