//! Main authentication service implementation

use std::future::Future;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::domain::entities::session::{ClientInfo, SessionRecord};
use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::User;
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, StoreError};
use crate::repositories::{SessionRepository, UserRepository};
use crate::services::password::PasswordHasher;
use crate::services::token::TokenService;

use super::config::AuthServiceConfig;

/// A signed token pair and the session record that makes the refresh half live
struct MintedSession {
    access_token: String,
    refresh_token: String,
    record: SessionRecord,
}

/// Authentication service managing the session state machine
///
/// This service is the only writer of session records.
pub struct AuthService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// User repository for credential lookups
    user_repository: Arc<U>,
    /// Session repository holding live refresh tokens
    session_repository: Arc<S>,
    /// Token codec
    token_service: Arc<TokenService>,
    /// Password hasher
    password_hasher: PasswordHasher,
    /// Service configuration
    config: AuthServiceConfig,
    /// Hash verified against when the email is unknown, so both login
    /// failures cost the same
    dummy_hash: OnceCell<String>,
}

impl<U, S> AuthService<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    /// Create a new authentication service
    pub fn new(
        user_repository: Arc<U>,
        session_repository: Arc<S>,
        token_service: Arc<TokenService>,
        password_hasher: PasswordHasher,
        config: AuthServiceConfig,
    ) -> Self {
        Self {
            user_repository,
            session_repository,
            token_service,
            password_hasher,
            config,
            dummy_hash: OnceCell::new(),
        }
    }

    /// Access token lifetime in seconds
    pub fn access_token_ttl(&self) -> i64 {
        self.token_service.ttl(TokenKind::Access)
    }

    /// Register a new account and open its first session
    ///
    /// # Errors
    ///
    /// * `AuthError::AlreadyExists` - The email is taken
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> DomainResult<AuthResponse> {
        let email = User::normalize_email(email);

        if self
            .with_deadline("users.exists_by_email", self.user_repository.exists_by_email(&email))
            .await?
        {
            return Err(AuthError::AlreadyExists.into());
        }

        let password_hash = self.password_hasher.hash(password).await?;
        let user = User::new(name, &email, password_hash);

        let user = match self
            .with_deadline("users.create", self.user_repository.create(user))
            .await
        {
            Ok(user) => user,
            // Lost a race with a concurrent registration of the same email
            Err(DomainError::Store(StoreError::Conflict(_))) => {
                return Err(AuthError::AlreadyExists.into())
            }
            Err(e) => return Err(e),
        };

        info!(user_id = %user.id, "new user registered");
        self.issue(&user, &client).await
    }

    /// Authenticate with email and password and open a session for the device
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
        client: ClientInfo,
    ) -> DomainResult<AuthResponse> {
        let email = User::normalize_email(email);

        let user = self
            .with_deadline("users.find_by_email", self.user_repository.find_by_email(&email))
            .await?;

        let Some(user) = user else {
            let dummy = self.dummy_hash().await?;
            let _ = self.password_hasher.verify(password, dummy).await?;
            debug!("login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self
            .password_hasher
            .verify(password, &user.password_hash)
            .await?
        {
            debug!(user_id = %user.id, "login rejected: wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        info!(user_id = %user.id, device_id = %client.device_id, "user logged in");
        self.issue(&user, &client).await
    }

    /// Exchange a refresh token for a new pair, consuming the old token
    ///
    /// # Errors
    ///
    /// * `AuthError::TokenInvalid` - Bad token, unknown or already consumed
    /// * `AuthError::TokenExpired` - The stored session has expired
    pub async fn refresh(
        &self,
        refresh_token: &str,
        client: ClientInfo,
    ) -> DomainResult<AuthResponse> {
        let claims = self
            .token_service
            .verify(refresh_token, TokenKind::Refresh)
            .map_err(|_| AuthError::TokenInvalid)?;

        let record = self
            .with_deadline(
                "sessions.find_by_token",
                self.session_repository.find_by_token(refresh_token),
            )
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        if record.is_expired() {
            self.with_deadline(
                "sessions.delete_by_token",
                self.session_repository.delete_by_token(refresh_token),
            )
            .await?;
            debug!(user_id = %record.user_id, "refresh rejected: session expired");
            return Err(AuthError::TokenExpired.into());
        }

        let subject = claims.user_id().map_err(|_| AuthError::TokenInvalid)?;
        if subject != record.user_id {
            warn!(
                user_id = %record.user_id,
                subject = %subject,
                "refresh rejected: token subject does not own the session"
            );
            return Err(AuthError::TokenInvalid.into());
        }

        let user = self
            .with_deadline("users.find_by_id", self.user_repository.find_by_id(subject))
            .await?
            .ok_or(AuthError::TokenInvalid)?;

        let minted = self.mint(&user, &client)?;

        let rotated = self
            .with_deadline(
                "sessions.rotate",
                self.session_repository
                    .rotate(refresh_token, minted.record.clone()),
            )
            .await?;

        if !rotated {
            warn!(user_id = %user.id, "refresh rejected: token already consumed");
            return Err(AuthError::TokenInvalid.into());
        }

        info!(user_id = %user.id, device_id = %client.device_id, "refresh token rotated");
        Ok(self.respond(minted, &user))
    }

    /// Revoke one session or every session of `user_id`
    ///
    /// Idempotent. A single-device logout only removes the record when it
    /// belongs to `user_id`.
    pub async fn logout(
        &self,
        user_id: Uuid,
        refresh_token: Option<&str>,
        all_devices: bool,
    ) -> DomainResult<()> {
        if all_devices {
            let removed = self
                .with_deadline(
                    "sessions.delete_by_user_id",
                    self.session_repository.delete_by_user_id(user_id),
                )
                .await?;
            info!(user_id = %user_id, removed, "logged out from all devices");
            return Ok(());
        }

        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            debug!(user_id = %user_id, "logout without refresh token, nothing to revoke");
            return Ok(());
        };

        let record = self
            .with_deadline(
                "sessions.find_by_token",
                self.session_repository.find_by_token(token),
            )
            .await?;

        match record {
            Some(record) if record.user_id == user_id => {
                self.with_deadline(
                    "sessions.delete_by_token",
                    self.session_repository.delete_by_token(token),
                )
                .await?;
                info!(user_id = %user_id, device_id = %record.device_id, "logged out");
            }
            Some(record) => {
                warn!(
                    user_id = %user_id,
                    owner = %record.user_id,
                    "logout ignored: refresh token belongs to another user"
                );
            }
            None => debug!(user_id = %user_id, "logout for unknown refresh token"),
        }

        Ok(())
    }

    /// Mint a pair and persist its session record
    async fn issue(&self, user: &User, client: &ClientInfo) -> DomainResult<AuthResponse> {
        let minted = self.mint(user, client)?;

        self.with_deadline(
            "sessions.create",
            self.session_repository.create(minted.record.clone()),
        )
        .await?;

        Ok(self.respond(minted, user))
    }

    fn mint(&self, user: &User, client: &ClientInfo) -> DomainResult<MintedSession> {
        let access = self.token_service.issue(user.id, TokenKind::Access)?;
        let refresh = self.token_service.issue(user.id, TokenKind::Refresh)?;

        // Record expiry is the signed expiry, never a separate constant.
        let record = SessionRecord::new(
            user.id,
            refresh.token.clone(),
            client,
            refresh.claims.expires_at(),
        );

        Ok(MintedSession {
            access_token: access.token,
            refresh_token: refresh.token,
            record,
        })
    }

    fn respond(&self, minted: MintedSession, user: &User) -> AuthResponse {
        AuthResponse::new(
            minted.access_token,
            minted.refresh_token,
            self.access_token_ttl(),
            user,
        )
    }

    async fn dummy_hash(&self) -> DomainResult<&str> {
        let hasher = self.password_hasher;
        let hash = self
            .dummy_hash
            .get_or_try_init(|| async move { hasher.hash("timing-equalizer").await })
            .await?;
        Ok(hash.as_str())
    }

    /// Bound a store call by the configured deadline
    ///
    /// On expiry the call's future is dropped, which cancels it.
    async fn with_deadline<T, F>(&self, operation: &'static str, call: F) -> DomainResult<T>
    where
        F: Future<Output = DomainResult<T>>,
    {
        match tokio::time::timeout(self.config.store_timeout, call).await {
            Ok(result) => result.map_err(|e| {
                if e.is_internal() {
                    error!(operation, error = %e, "store call failed");
                }
                e
            }),
            Err(_) => {
                error!(
                    operation,
                    timeout_ms = self.config.store_timeout.as_millis() as u64,
                    "store call timed out"
                );
                Err(StoreError::Timeout(self.config.store_timeout).into())
            }
        }
    }
}
