//! Shared setup for the HTTP tests

#![allow(dead_code)]

use actix_web::{http::header, test, web};
use serde_json::{json, Value};
use std::sync::Arc;

use ak_api::routes::auth::AppState;
use ak_core::repositories::{InMemorySessionRepository, InMemoryUserRepository};
use ak_core::services::{
    AuthService, AuthServiceConfig, PasswordHasher, RequestGate, TokenService, TokenServiceConfig,
};

pub const ACCESS_SECRET: &str = "api-test-access-secret";
pub const REFRESH_SECRET: &str = "api-test-refresh-secret";
pub const PASSWORD: &str = "correct-horse-battery";

pub type TestState = AppState<InMemoryUserRepository, InMemorySessionRepository>;

pub struct TestContext {
    pub state: web::Data<TestState>,
    pub gate: web::Data<RequestGate>,
    pub tokens: Arc<TokenService>,
    pub users: Arc<InMemoryUserRepository>,
    pub sessions: Arc<InMemorySessionRepository>,
}

pub fn setup() -> TestContext {
    let users = Arc::new(InMemoryUserRepository::new());
    let sessions = Arc::new(InMemorySessionRepository::new());
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new(
        ACCESS_SECRET,
        REFRESH_SECRET,
    )));

    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        sessions.clone(),
        tokens.clone(),
        PasswordHasher::new(4),
        AuthServiceConfig::default(),
    ));

    TestContext {
        state: web::Data::new(AppState::new(auth_service)),
        gate: web::Data::new(RequestGate::new(tokens.clone())),
        tokens,
        users,
        sessions,
    }
}

pub fn register_request(email: &str, device_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/register")
        .insert_header((header::USER_AGENT, "api-tests/1.0"))
        .set_json(json!({
            "name": "Test User",
            "email": email,
            "password": PASSWORD,
            "device_id": device_id,
        }))
}

pub fn login_request(email: &str, password: &str, device_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/login")
        .insert_header((header::USER_AGENT, "api-tests/1.0"))
        .set_json(json!({
            "email": email,
            "password": password,
            "device_id": device_id,
        }))
}

pub fn refresh_request(refresh_token: &str, device_id: &str) -> test::TestRequest {
    test::TestRequest::post()
        .uri("/api/v1/auth/refresh")
        .set_json(json!({
            "refresh_token": refresh_token,
            "device_id": device_id,
        }))
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// `(access_token, refresh_token)` from a success envelope
pub fn token_pair(body: &Value) -> (String, String) {
    let data = &body["data"];
    (
        data["access_token"].as_str().unwrap().to_string(),
        data["refresh_token"].as_str().unwrap().to_string(),
    )
}
