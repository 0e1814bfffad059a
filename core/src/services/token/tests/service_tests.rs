//! Unit tests for the token codec

use chrono::{Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, TokenKind};
use crate::errors::TokenError;
use crate::services::token::{TokenService, TokenServiceConfig};

const ACCESS_SECRET: &str = "test-access-secret";
const REFRESH_SECRET: &str = "test-refresh-secret";

fn service() -> TokenService {
    TokenService::new(TokenServiceConfig::new(ACCESS_SECRET, REFRESH_SECRET))
}

fn sign(claims: &Claims, secret: &str, algorithm: Algorithm) -> String {
    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_issue_then_verify_roundtrip_for_each_kind() {
    let service = service();
    let user_id = Uuid::new_v4();

    for kind in [TokenKind::Access, TokenKind::Refresh] {
        let issued = service.issue(user_id, kind).unwrap();
        let claims = service.verify(&issued.token, kind).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.token_type, kind);
        assert_eq!(claims, issued.claims);
        assert_eq!(claims.exp - claims.iat, service.ttl(kind));
    }
}

#[test]
fn test_token_never_verifies_as_other_kind() {
    let service = service();
    let user_id = Uuid::new_v4();

    let access = service.issue(user_id, TokenKind::Access).unwrap();
    let refresh = service.issue(user_id, TokenKind::Refresh).unwrap();

    assert_eq!(
        service.verify(&access.token, TokenKind::Refresh),
        Err(TokenError::VerificationFailed)
    );
    assert_eq!(
        service.verify(&refresh.token, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_tokens_are_unique_per_issue() {
    let service = service();
    let user_id = Uuid::new_v4();
    let now = Utc::now();

    let a = service.issue_at(user_id, TokenKind::Refresh, now).unwrap();
    let b = service.issue_at(user_id, TokenKind::Refresh, now).unwrap();

    assert_ne!(a.token, b.token);
    assert_ne!(a.claims.jti, b.claims.jti);
}

#[test]
fn test_expired_token_rejected() {
    let service = service();
    let issued = service
        .issue_at(Uuid::new_v4(), TokenKind::Access, Utc::now() - Duration::hours(1))
        .unwrap();

    assert_eq!(
        service.verify(&issued.token, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_kind_claim_checked_even_with_matching_secret() {
    // Secret reuse misconfiguration: both kinds signed with one key.
    let service = TokenService::new(TokenServiceConfig::new("shared", "shared"));
    let refresh = service.issue(Uuid::new_v4(), TokenKind::Refresh).unwrap();

    assert_eq!(
        service.verify(&refresh.token, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_access_claims_signed_with_refresh_secret_rejected() {
    let service = service();
    let claims = Claims::new(Uuid::new_v4(), TokenKind::Access, Utc::now(), 900);
    let forged = sign(&claims, REFRESH_SECRET, Algorithm::HS256);

    assert_eq!(
        service.verify(&forged, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_other_algorithm_rejected() {
    let service = service();
    let claims = Claims::new(Uuid::new_v4(), TokenKind::Access, Utc::now(), 900);
    let token = sign(&claims, ACCESS_SECRET, Algorithm::HS512);

    assert_eq!(
        service.verify(&token, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_unsigned_token_rejected() {
    let service = service();
    let issued = service.issue(Uuid::new_v4(), TokenKind::Access).unwrap();
    let mut parts = issued.token.split('.');
    let (_, payload) = (parts.next().unwrap(), parts.next().unwrap());
    // {"alg":"none","typ":"JWT"}
    let forged = format!("eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.{}.", payload);

    assert_eq!(
        service.verify(&forged, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_non_uuid_subject_rejected() {
    let service = service();
    let mut claims = Claims::new(Uuid::new_v4(), TokenKind::Access, Utc::now(), 900);
    claims.sub = "admin".to_string();
    let token = sign(&claims, ACCESS_SECRET, Algorithm::HS256);

    assert_eq!(
        service.verify(&token, TokenKind::Access),
        Err(TokenError::VerificationFailed)
    );
}

#[test]
fn test_garbage_rejected() {
    let service = service();
    for input in ["", "abc", "a.b.c", "Bearer x"] {
        assert_eq!(
            service.verify(input, TokenKind::Access),
            Err(TokenError::VerificationFailed)
        );
    }
}

#[test]
fn test_wire_format_has_three_segments() {
    let service = service();
    let issued = service.issue(Uuid::new_v4(), TokenKind::Access).unwrap();
    assert_eq!(issued.token.split('.').count(), 3);
}

#[test]
fn test_unrepresentable_expiry_fails_to_sign() {
    let mut config = TokenServiceConfig::new(ACCESS_SECRET, REFRESH_SECRET);
    config.refresh_ttl_seconds = i64::MAX;
    let service = TokenService::new(config);

    let result = service.issue(Uuid::new_v4(), TokenKind::Refresh);
    assert!(matches!(result, Err(TokenError::SigningFailed)));

    // The other kind is unaffected
    assert!(service.issue(Uuid::new_v4(), TokenKind::Access).is_ok());
}
