//! # AuthKeep Core
//!
//! Domain layer for the AuthKeep token lifecycle: entities, the error
//! taxonomy, storage contracts with in-memory backends, and the services
//! that issue, verify, rotate and revoke credentials.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::{
    AuthResponse, Claims, ClientInfo, IssuedToken, SessionRecord, TokenKind, User, UserProfile,
};
pub use errors::{AuthError, DomainError, DomainResult, StoreError, TokenError};
pub use repositories::{
    InMemorySessionRepository, InMemoryUserRepository, SessionRepository, UserRepository,
};
pub use services::{
    AuthContext, AuthService, AuthServiceConfig, PasswordHasher, RequestGate, SessionSweeper,
    SweepResult, SweeperConfig, TokenService, TokenServiceConfig,
};
