use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use ak_shared::config::SessionConfig;

use crate::errors::{DomainError, StoreError};
use crate::repositories::SessionRepository;

/// Configuration for the expired-session sweeper
#[derive(Debug, Clone)]
pub struct SweeperConfig {
    /// How often to sweep
    pub interval: Duration,
    /// Whether the background task runs at all
    pub enabled: bool,
    /// Deadline for one `delete_expired` call
    pub store_timeout: Duration,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(3600),
            enabled: true,
            store_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&SessionConfig> for SweeperConfig {
    fn from(config: &SessionConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.sweep_interval),
            enabled: config.sweep_enabled,
            store_timeout: Duration::from_millis(config.store_timeout_ms),
        }
    }
}

/// Outcome of one sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SweepResult {
    /// Number of expired records deleted
    pub expired_sessions_deleted: usize,
}

/// Periodically deletes expired session records
pub struct SessionSweeper<S: SessionRepository + 'static> {
    repository: Arc<S>,
    config: SweeperConfig,
}

impl<S: SessionRepository> SessionSweeper<S> {
    pub fn new(repository: Arc<S>, config: SweeperConfig) -> Self {
        Self { repository, config }
    }

    /// Run a single sweep
    pub async fn run_once(&self) -> Result<SweepResult, DomainError> {
        let deleted = tokio::time::timeout(self.config.store_timeout, self.repository.delete_expired())
            .await
            .map_err(|_| StoreError::Timeout(self.config.store_timeout))??;
        if deleted > 0 {
            info!(deleted, "swept expired sessions");
        }
        Ok(SweepResult {
            expired_sessions_deleted: deleted,
        })
    }

    /// Spawn the sweep loop
    ///
    /// Returns `None` when sweeping is disabled. A failed sweep is logged and
    /// the loop carries on with the next tick.
    pub fn start(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("session sweeper is disabled");
            return None;
        }

        let handle = tokio::spawn(async move {
            info!(
                interval_secs = self.config.interval.as_secs(),
                "session sweeper started"
            );

            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                if let Err(e) = self.run_once().await {
                    error!(error = %e, "session sweep failed");
                }
            }
        });

        Some(handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::session::{ClientInfo, SessionRecord};
    use crate::repositories::InMemorySessionRepository;
    use crate::services::auth::tests::mocks::SlowSessionRepository;
    use chrono::Utc;
    use uuid::Uuid;

    fn record(token: &str, ttl_seconds: i64) -> SessionRecord {
        SessionRecord::new(
            Uuid::new_v4(),
            token.to_string(),
            &ClientInfo::default(),
            Utc::now() + chrono::Duration::seconds(ttl_seconds),
        )
    }

    #[tokio::test]
    async fn test_run_once_deletes_only_expired() {
        let repo = Arc::new(InMemorySessionRepository::new());
        repo.create(record("expired", -5)).await.unwrap();
        repo.create(record("live", 300)).await.unwrap();

        let sweeper = SessionSweeper::new(repo.clone(), SweeperConfig::default());
        let result = sweeper.run_once().await.unwrap();

        assert_eq!(result.expired_sessions_deleted, 1);
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_disabled_sweeper_does_not_start() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let sweeper = Arc::new(SessionSweeper::new(
            repo,
            SweeperConfig {
                enabled: false,
                ..Default::default()
            },
        ));

        assert!(sweeper.start().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_background_loop_sweeps() {
        let repo = Arc::new(InMemorySessionRepository::new());
        let sweeper = Arc::new(SessionSweeper::new(
            repo.clone(),
            SweeperConfig {
                interval: Duration::from_secs(60),
                ..Default::default()
            },
        ));

        let handle = sweeper.start().unwrap();

        repo.create(record("expired", -5)).await.unwrap();
        tokio::time::sleep(Duration::from_secs(61)).await;

        assert!(repo.is_empty().await);
        handle.abort();
    }

    #[test]
    fn test_config_from_session_config() {
        let config = SweeperConfig::from(&SessionConfig {
            store_timeout_ms: 100,
            sweep_interval: 30,
            sweep_enabled: false,
        });
        assert_eq!(config.interval, Duration::from_secs(30));
        assert!(!config.enabled);
        assert_eq!(config.store_timeout, Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_once_bounded_by_store_deadline() {
        let repo = Arc::new(SlowSessionRepository {
            inner: InMemorySessionRepository::new(),
            delay: Duration::from_millis(500),
        });
        repo.inner.create(record("expired", -5)).await.unwrap();

        let sweeper = SessionSweeper::new(
            repo.clone(),
            SweeperConfig {
                store_timeout: Duration::from_millis(20),
                ..Default::default()
            },
        );

        let err = sweeper.run_once().await.unwrap_err();
        assert!(matches!(err, DomainError::Store(StoreError::Timeout(_))));
        assert_eq!(repo.inner.len().await, 1);
    }
}
