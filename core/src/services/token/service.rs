//! Token codec implementation

use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error};
use uuid::Uuid;

use crate::domain::entities::token::{Claims, IssuedToken, TokenKind};
use crate::errors::TokenError;

use super::config::TokenServiceConfig;

struct SigningKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl SigningKeys {
    fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
        }
    }
}

/// Signs and verifies access and refresh tokens
///
/// Immutable after construction; share it behind an `Arc`.
pub struct TokenService {
    config: TokenServiceConfig,
    access_keys: SigningKeys,
    refresh_keys: SigningKeys,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service from its configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        // Only HS256 is accepted; a token declaring any other alg is rejected.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            access_keys: SigningKeys::from_secret(&config.access_secret),
            refresh_keys: SigningKeys::from_secret(&config.refresh_secret),
            config,
            validation,
        }
    }

    fn keys(&self, kind: TokenKind) -> &SigningKeys {
        match kind {
            TokenKind::Access => &self.access_keys,
            TokenKind::Refresh => &self.refresh_keys,
        }
    }

    /// Lifetime in seconds of tokens of `kind`
    pub fn ttl(&self, kind: TokenKind) -> i64 {
        self.config.ttl(kind)
    }

    /// Issues a token of `kind` for `user_id`, valid from now
    pub fn issue(&self, user_id: Uuid, kind: TokenKind) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, kind, Utc::now())
    }

    /// Issues a token as if the clock read `issued_at`
    pub fn issue_at(
        &self,
        user_id: Uuid,
        kind: TokenKind,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = self.ttl(kind);
        let representable = issued_at
            .timestamp()
            .checked_add(ttl)
            .and_then(|exp| Utc.timestamp_opt(exp, 0).single())
            .is_some();
        if !representable {
            error!(kind = %kind, ttl, "token expiry out of range");
            return Err(TokenError::SigningFailed);
        }

        let claims = Claims::new(user_id, kind, issued_at, ttl);
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.keys(kind).encoding)
            .map_err(|e| {
                error!(error = %e, kind = %kind, "failed to sign token");
                TokenError::SigningFailed
            })?;

        Ok(IssuedToken { token, claims })
    }

    /// Verifies a token expected to be of `expected` kind
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - Signature, algorithm, expiry and kind all check out
    /// * `Err(TokenError::VerificationFailed)` - Anything else
    pub fn verify(&self, token: &str, expected: TokenKind) -> Result<Claims, TokenError> {
        let data = decode::<Claims>(token, &self.keys(expected).decoding, &self.validation)
            .map_err(|e| {
                let cause = match e.kind() {
                    ErrorKind::ExpiredSignature => "expired",
                    ErrorKind::InvalidSignature => "bad signature",
                    ErrorKind::InvalidAlgorithm => "algorithm mismatch",
                    _ => "malformed",
                };
                debug!(cause, expected = %expected, "token rejected");
                TokenError::VerificationFailed
            })?;

        let claims = data.claims;

        if claims.exp <= Utc::now().timestamp() {
            debug!(expected = %expected, "token rejected: expired");
            return Err(TokenError::VerificationFailed);
        }

        if claims.token_type != expected {
            debug!(
                expected = %expected,
                actual = %claims.token_type,
                "token rejected: kind mismatch"
            );
            return Err(TokenError::VerificationFailed);
        }

        if claims.user_id().is_err() {
            debug!(expected = %expected, "token rejected: subject is not an identity");
            return Err(TokenError::VerificationFailed);
        }

        Ok(claims)
    }
}
