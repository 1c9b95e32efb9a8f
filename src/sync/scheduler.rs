use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

use crate::common::SharedStatus;
use crate::sync::worker::{ArchiveOutcome, SyncWorker};

/// Run the sync pass on a fixed interval.
///
/// Each firing spawns one pass. A firing that arrives while the previous
/// pass still holds the worker is skipped, so passes never overlap.
pub async fn run_sync(worker: Arc<Mutex<SyncWorker>>, status: SharedStatus, interval_secs: u64) {
    tracing::info!(interval_secs, "Starting sync scheduler");

    let mut ticker = interval(Duration::from_secs(interval_secs));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // Run initial pass immediately
    ticker.tick().await;

    loop {
        fire(&worker, &status).await;

        // Wait for next tick
        ticker.tick().await;
    }
}

/// Start one pass if none is in flight. Returns the pass's task handle, or
/// `None` when the firing was skipped.
pub async fn fire(worker: &Arc<Mutex<SyncWorker>>, status: &SharedStatus) -> Option<JoinHandle<()>> {
    let Ok(mut guard) = Arc::clone(worker).try_lock_owned() else {
        tracing::warn!("Previous sync pass still running, skipping this tick");
        status.write().await.skipped_ticks += 1;
        return None;
    };

    let status = Arc::clone(status);
    Some(tokio::spawn(async move {
        let started_at = Utc::now();
        tracing::debug!("Running sync pass...");

        let result = guard.tick().await;
        status.write().await.record_tick(started_at, &result);

        match result {
            Ok(report) => match report.archive {
                ArchiveOutcome::Imported { count, last } => {
                    tracing::debug!(count, last = %last, "Sync pass completed with archive import");
                }
                ArchiveOutcome::Empty => {
                    tracing::debug!("Sync pass completed, archive batch empty, will retry next tick");
                }
                ArchiveOutcome::NotNeeded => {
                    tracing::debug!("Sync pass completed");
                }
            },
            Err(e) if e.is_command_failure() => {
                tracing::error!(error = %e, "Station command failed, will retry next tick");
            }
            Err(e) => {
                tracing::error!(error = %e, "Sync pass failed, will retry next tick");
            }
        }
    }))
}
