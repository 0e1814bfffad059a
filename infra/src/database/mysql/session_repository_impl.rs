//! MySQL implementation of the SessionRepository trait.
//!
//! Rotation runs inside one transaction: the consumed row is deleted first and
//! the replacement is inserted only if that delete hit a row. InnoDB's row
//! lock on the deleted token serializes concurrent rotations of it. The
//! transaction runs at READ COMMITTED so only record locks are taken.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Connection, MySqlPool, Row};
use tracing::debug;
use uuid::Uuid;

use ak_core::domain::entities::session::SessionRecord;
use ak_core::errors::DomainError;
use ak_core::repositories::SessionRepository;

use super::mapping::{column_error, parse_uuid, read_error, write_error};

const SESSION_COLUMNS: &str =
    "id, user_id, token, device_id, user_agent, expires_at, created_at";

const INSERT_SESSION: &str = r#"
    INSERT INTO refresh_tokens (
        id, user_id, token, device_id, user_agent, expires_at, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?)
"#;

const TOKEN_KEY: &str = "refresh_tokens.token";

/// MySQL implementation of SessionRepository
pub struct MySqlSessionRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlSessionRepository {
    /// Create a new MySQL session repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to SessionRecord
    fn row_to_session(row: &sqlx::mysql::MySqlRow) -> Result<SessionRecord, DomainError> {
        let id: String = row.try_get("id").map_err(|e| column_error("id", e))?;
        let user_id: String = row
            .try_get("user_id")
            .map_err(|e| column_error("user_id", e))?;

        Ok(SessionRecord {
            id: parse_uuid("id", &id)?,
            user_id: parse_uuid("user_id", &user_id)?,
            token: row.try_get("token").map_err(|e| column_error("token", e))?,
            device_id: row
                .try_get("device_id")
                .map_err(|e| column_error("device_id", e))?,
            user_agent: row
                .try_get("user_agent")
                .map_err(|e| column_error("user_agent", e))?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| column_error("expires_at", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| column_error("created_at", e))?,
        })
    }

    fn insert_query(
        record: &SessionRecord,
    ) -> sqlx::query::Query<'_, sqlx::MySql, sqlx::mysql::MySqlArguments> {
        sqlx::query(INSERT_SESSION)
            .bind(record.id.to_string())
            .bind(record.user_id.to_string())
            .bind(&record.token)
            .bind(&record.device_id)
            .bind(&record.user_agent)
            .bind(record.expires_at)
            .bind(record.created_at)
    }
}

#[async_trait]
impl SessionRepository for MySqlSessionRepository {
    async fn create(&self, record: SessionRecord) -> Result<SessionRecord, DomainError> {
        Self::insert_query(&record)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error(e, TOKEN_KEY))?;

        Ok(record)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<SessionRecord>, DomainError> {
        let query = format!(
            "SELECT {} FROM refresh_tokens WHERE token = ? LIMIT 1",
            SESSION_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(token)
            .fetch_optional(&self.pool)
            .await
            .map_err(read_error)?;

        row.as_ref().map(Self::row_to_session).transpose()
    }

    async fn delete_by_token(&self, token: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE token = ?")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user_id(&self, user_id: Uuid) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(result.rows_affected() as usize)
    }

    async fn delete_expired(&self) -> Result<usize, DomainError> {
        let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at <= ?")
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(read_error)?;

        Ok(result.rows_affected() as usize)
    }

    async fn rotate(
        &self,
        consumed_token: &str,
        replacement: SessionRecord,
    ) -> Result<bool, DomainError> {
        let mut conn = self.pool.acquire().await.map_err(read_error)?;
        sqlx::query("SET TRANSACTION ISOLATION LEVEL READ COMMITTED")
            .execute(&mut *conn)
            .await
            .map_err(read_error)?;

        // Dropping `tx` without commit rolls back, including on cancellation.
        let mut tx = conn.begin().await.map_err(read_error)?;

        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token = ?")
            .bind(consumed_token)
            .execute(&mut *tx)
            .await
            .map_err(read_error)?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await.map_err(read_error)?;
            debug!(user_id = %replacement.user_id, "rotation found no live session");
            return Ok(false);
        }

        Self::insert_query(&replacement)
            .execute(&mut *tx)
            .await
            .map_err(|e| write_error(e, TOKEN_KEY))?;

        tx.commit().await.map_err(read_error)?;
        Ok(true)
    }
}
