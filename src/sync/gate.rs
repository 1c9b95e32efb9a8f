use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::clock::ClockOracle;
use crate::error::AppResult;
use crate::station::LiveConditions;
use crate::store::WeatherStore;

/// What happened to a polled live record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LiveWrite {
    Stored,
    /// Host clock not synchronized; record kept in memory only
    SkippedClockUntrusted,
    /// Startup poll, used only to seed the archive pointer
    Suppressed,
}

/// Guards the current-conditions write with a clock-sync precondition, so
/// the row is never stamped with an untrustworthy host time. Archive writes
/// carry station timestamps and don't go through here.
pub struct PersistenceGate {
    oracle: Arc<dyn ClockOracle>,
    require_clock_sync: bool,
}

impl PersistenceGate {
    #[must_use]
    pub fn new(oracle: Arc<dyn ClockOracle>, require_clock_sync: bool) -> Self {
        Self {
            oracle,
            require_clock_sync,
        }
    }

    /// Write `live` unless the clock is untrusted.
    ///
    /// # Errors
    ///
    /// Returns the store error if the write is attempted and rejected.
    pub async fn persist_live(
        &self,
        store: &dyn WeatherStore,
        live: &LiveConditions,
    ) -> AppResult<LiveWrite> {
        if self.require_clock_sync && !self.oracle.is_synchronized().await {
            tracing::info!(
                polled_at = %live.id,
                "Host clock not synchronized, skipping live weather write"
            );
            return Ok(LiveWrite::SkippedClockUntrusted);
        }

        store.upsert_live(live).await?;
        Ok(LiveWrite::Stored)
    }
}
