//! Session repository trait defining the interface for refresh token records.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::errors::DomainError;

/// Repository trait for SessionRecord persistence
///
/// Records are keyed by the signed refresh token string, which is unique.
/// Every delete is idempotent: removing something absent is not an error.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Insert a new record
    ///
    /// # Returns
    /// * `Err(DomainError::Store(StoreError::Conflict))` - The token string already exists
    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError>;

    /// Find a record by its refresh token string
    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, DomainError>;

    /// Delete the record for `token`
    ///
    /// # Returns
    /// * `Ok(true)` - A record was removed
    /// * `Ok(false)` - Nothing matched
    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError>;

    /// Delete every record for a user, returning how many were removed
    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError>;

    /// Delete every record whose expiry has passed
    async fn delete_expired(&self) -> Result<usize, DomainError>;

    /// Atomically consume `consumed_token` and store `replacement`
    ///
    /// The delete and the insert happen as one unit. When the consumed
    /// record no longer exists nothing is inserted and `Ok(false)` is
    /// returned, so of two racing rotations of the same token at most one
    /// observes `Ok(true)`.
    async fn rotate(
        &self,
        consumed_token: &str,
        replacement: SessionRecord,
    ) -> Result<bool, DomainError>;
}
