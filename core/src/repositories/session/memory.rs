//! In-memory implementation of SessionRepository

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::session::SessionRecord;
use crate::errors::{DomainError, StoreError};

use super::r#trait::SessionRepository;

/// Session repository backed by a process-local map
///
/// All mutations take the single write lock, which makes `rotate` atomic.
#[derive(Clone, Default)]
pub struct InMemorySessionRepository {
    sessions: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl InMemorySessionRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError> {
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&record.token) {
            return Err(StoreError::Conflict("refresh_tokens.token".to_string()).into());
        }

        sessions.insert(record.token.clone(), record.clone());
        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, DomainError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(token).cloned())
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(token).is_some())
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, r| r.user_id != user_id);
        Ok(before - sessions.len())
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let now = Utc::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, r| !r.is_expired_at(now));
        Ok(before - sessions.len())
    }

    async fn rotate(
        &self,
        consumed_token: &str,
        replacement: SessionRecord,
    ) -> Result<bool, DomainError> {
        let mut sessions = self.sessions.write().await;

        if sessions.remove(consumed_token).is_none() {
            return Ok(false);
        }

        if sessions.contains_key(&replacement.token) {
            return Err(StoreError::Conflict("refresh_tokens.token".to_string()).into());
        }

        sessions.insert(replacement.token.clone(), replacement);
        Ok(true)
    }
}
