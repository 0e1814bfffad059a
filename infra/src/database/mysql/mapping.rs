//! Conversions between sqlx values and domain errors

use ak_core::errors::{DomainError, StoreError};
use uuid::Uuid;

/// Parse a CHAR(36) column into a UUID
pub(crate) fn parse_uuid(column: &str, value: &str) -> Result<Uuid, DomainError> {
    Uuid::parse_str(value).map_err(|e| {
        StoreError::Database {
            message: format!("Invalid UUID in column {}: {}", column, e),
        }
        .into()
    })
}

/// Map a failed write, turning unique-key violations into conflicts
pub(crate) fn write_error(err: sqlx::Error, key: &str) -> DomainError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::Conflict(key.to_string()).into()
        }
        _ => read_error(err),
    }
}

/// Map any other sqlx failure to an opaque database fault
pub(crate) fn read_error(err: sqlx::Error) -> DomainError {
    StoreError::database(err).into()
}

/// Wrap a column extraction failure
pub(crate) fn column_error(column: &str, err: sqlx::Error) -> DomainError {
    StoreError::Database {
        message: format!("Failed to get {}: {}", column, err),
    }
    .into()
}
