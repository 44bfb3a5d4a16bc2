//! Dashboard store.
//!
//! Two read-only snapshots with asymmetric failure handling: the stats
//! summary is the dashboard's primary payload, so its failure raises the
//! `error` flag, while a failed health probe only degrades the health
//! snapshot to its unhealthy form. A dead health endpoint never blocks the
//! stats cards.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use parlo_core::{HealthSnapshot, StatsRange, StatsSnapshot};
use serde::Deserialize;

use crate::error::ClientError;
use crate::gateway::AdminClient;

#[derive(Deserialize)]
struct StatsEnvelope {
    stats: StatsSnapshot,
}

#[derive(Debug, Default)]
struct DashboardState {
    stats: StatsSnapshot,
    health: HealthSnapshot,
    loading: bool,
    error: Option<String>,
    refreshed_at: Option<DateTime<Utc>>,
}

/// Analytics snapshots for the dashboard view.
#[derive(Debug)]
pub struct DashboardStore {
    client: AdminClient,
    state: RwLock<DashboardState>,
}

impl DashboardStore {
    #[must_use]
    pub fn new(client: AdminClient) -> Self {
        Self {
            client,
            state: RwLock::new(DashboardState::default()),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.read().stats.clone()
    }

    #[must_use]
    pub fn health(&self) -> HealthSnapshot {
        self.read().health.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.read().loading
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    /// When the stats snapshot was last replaced, if ever.
    #[must_use]
    pub fn refreshed_at(&self) -> Option<DateTime<Utc>> {
        self.read().refreshed_at
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    /// Restore the pre-fetch placeholders (logout, workspace switch).
    pub fn reset(&self) {
        *self.write() = DashboardState::default();
    }

    /// Replace the stats snapshot for the given time window.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_stats(&self, range: StatsRange) -> Result<StatsSnapshot, ClientError> {
        {
            let mut state = self.write();
            state.loading = true;
            state.error = None;
        }
        let path = format!("/admin/stats-summary?range={}", range.as_str());
        match self.client.get_json::<StatsEnvelope>(&path).await {
            Ok(envelope) => {
                let mut state = self.write();
                state.loading = false;
                state.stats = envelope.stats.clone();
                state.refreshed_at = Some(Utc::now());
                drop(state);
                Ok(envelope.stats)
            }
            Err(err) => {
                let mut state = self.write();
                state.loading = false;
                state.error = Some(err.flag_message("Failed to fetch dashboard data"));
                drop(state);
                Err(err)
            }
        }
    }

    /// Probe system health. The payload is the snapshot itself, not an
    /// envelope. Failure degrades the snapshot instead of raising `error`,
    /// and the shared `loading` flag is left to the stats fetch.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport/server failure.
    pub async fn fetch_health(&self) -> Result<HealthSnapshot, ClientError> {
        match self.client.get_json::<HealthSnapshot>("/admin/health").await {
            Ok(health) => {
                self.write().health = health.clone();
                Ok(health)
            }
            Err(err) => {
                self.write().health = HealthSnapshot::unhealthy();
                Err(err)
            }
        }
    }
}
