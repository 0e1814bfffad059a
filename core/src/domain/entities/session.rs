//! Session record tracking one issued refresh token on one device.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Device label used when a client registers without naming its device
pub const DEFAULT_DEVICE_ID: &str = "register-device";

/// Stored refresh token bound to a user and a device
///
/// Exactly one record exists per live refresh token. The record is removed
/// when the token is rotated, logged out, or swept after expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// Unique identifier for the record
    pub id: Uuid,

    /// User this session belongs to
    pub user_id: Uuid,

    /// The signed refresh token, unique across all records
    pub token: String,

    /// Client supplied device label
    pub device_id: String,

    /// User agent reported when the session was opened
    pub user_agent: String,

    /// Same instant as the refresh token's signed expiry
    pub expires_at: DateTime<Utc>,

    /// Timestamp when the record was created
    pub created_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Creates a record for a freshly issued refresh token
    pub fn new(
        user_id: Uuid,
        token: String,
        client: &ClientInfo,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token,
            device_id: client.device_id.clone(),
            user_agent: client.user_agent.clone(),
            expires_at,
            created_at: Utc::now(),
        }
    }

    /// Checks if the record has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Checks expiry against an explicit instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Caller-supplied description of the device opening a session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientInfo {
    pub device_id: String,
    pub user_agent: String,
}

impl ClientInfo {
    pub fn new(device_id: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            user_agent: user_agent.into(),
        }
    }

    /// Device info for registration, falling back to the default label
    pub fn for_registration(device_id: Option<String>, user_agent: impl Into<String>) -> Self {
        let device_id = device_id
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DEVICE_ID.to_string());
        Self::new(device_id, user_agent)
    }
}
