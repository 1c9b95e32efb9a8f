use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::error::AppResult;
use crate::store::WeatherStore;
use crate::sync::gate::LiveWrite;
use crate::sync::watermark::SyncWatermark;
use crate::sync::worker::{SyncPhase, TickReport};

/// Snapshot of the sync loop, published for the status endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SyncStatus {
    pub phase: SyncPhase,
    pub watermark: SyncWatermark,
    /// Station archive interval (minutes), probed at startup
    pub archive_period_minutes: Option<u32>,
    pub last_tick_at: Option<DateTime<Utc>>,
    pub last_tick_ok: Option<bool>,
    pub last_live_write: Option<LiveWrite>,
    pub last_error: Option<String>,
    /// Firings dropped because the previous pass was still running
    pub skipped_ticks: u64,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            phase: SyncPhase::Idle,
            watermark: SyncWatermark::default(),
            archive_period_minutes: None,
            last_tick_at: None,
            last_tick_ok: None,
            last_live_write: None,
            last_error: None,
            skipped_ticks: 0,
        }
    }
}

impl SyncStatus {
    pub fn record_tick(&mut self, started_at: DateTime<Utc>, result: &AppResult<TickReport>) {
        self.last_tick_at = Some(started_at);
        match result {
            Ok(report) => {
                self.last_tick_ok = Some(true);
                self.last_live_write = Some(report.live_write);
                self.last_error = None;
            }
            Err(e) => {
                self.last_tick_ok = Some(false);
                self.last_error = Some(e.to_string());
            }
        }
    }
}

pub type SharedStatus = Arc<RwLock<SyncStatus>>;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn WeatherStore>,
    pub status: SharedStatus,
}

impl AppState {
    pub fn new(store: Arc<dyn WeatherStore>, status: SharedStatus) -> Self {
        Self { store, status }
    }
}
