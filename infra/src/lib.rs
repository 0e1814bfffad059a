//! MySQL persistence for AuthKeep
//!
//! Implements the core `UserRepository` and `SessionRepository` contracts
//! on top of a sqlx pool, and owns the schema migrations.

#[cfg(feature = "mysql")]
pub mod database;

/// Failures while setting up persistence
///
/// Runtime repository failures are reported as `ak_core::StoreError`
/// instead; this type only covers startup.
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("configuration error: {0}")]
    Config(String),
}
