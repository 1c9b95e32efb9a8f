use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::common::SharedStatus;
use crate::error::AppResult;
use crate::station::StationClient;
use crate::store::WeatherStore;
use crate::sync::gate::{LiveWrite, PersistenceGate};
use crate::sync::watermark::SyncWatermark;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SyncPhase {
    Idle,
    PollingLive,
    NeedsArchiveSync,
    SyncingArchive,
}

/// Result of an archive catch-up attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// Pointer unchanged; no archive command issued
    NotNeeded,
    /// Command succeeded but yielded no valid records; watermark untouched
    Empty,
    Imported {
        count: usize,
        last: DateTime<Utc>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickReport {
    pub live_write: LiveWrite,
    pub archive: ArchiveOutcome,
}

/// Owns the watermark and drives one sync pass per tick.
///
/// Not reentrant: callers hold it behind a mutex so that two passes never
/// race on the watermark.
pub struct SyncWorker {
    station: StationClient,
    store: Arc<dyn WeatherStore>,
    gate: PersistenceGate,
    watermark: SyncWatermark,
    status: SharedStatus,
}

impl SyncWorker {
    #[must_use]
    pub fn new(
        station: StationClient,
        store: Arc<dyn WeatherStore>,
        gate: PersistenceGate,
        status: SharedStatus,
    ) -> Self {
        Self {
            station,
            store,
            gate,
            watermark: SyncWatermark::default(),
            status,
        }
    }

    #[must_use]
    pub fn watermark(&self) -> &SyncWatermark {
        &self.watermark
    }

    async fn publish(&self, phase: SyncPhase) {
        let mut status = self.status.write().await;
        status.phase = phase;
        status.watermark = self.watermark.clone();
    }

    /// Seed the watermark before the schedule is armed.
    ///
    /// Polls live conditions once without storing them (only to learn the
    /// archive pointer), seeds the archive timestamp from the newest stored
    /// row, then imports whatever the station has beyond it. Station
    /// failures here are logged and left to the first tick.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive store cannot be read.
    pub async fn bootstrap(&mut self) -> AppResult<()> {
        match self.station.live_conditions().await {
            Ok(live) => {
                tracing::debug!(pointer = ?live.next_archive_record, "Seeded archive pointer");
                self.watermark.seed_pointer(live.next_archive_record);
                self.status.write().await.last_live_write = Some(LiveWrite::Suppressed);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Initial live poll failed, first tick will sync archive");
            }
        }

        let latest = self.store.latest_archive_time().await?;
        self.watermark.seed_archive_timestamp(latest);
        tracing::info!(
            since = ?latest,
            "Importing archive records since last stored record"
        );

        let pointer = self.watermark.next_record_pointer;
        if let Err(e) = self.catch_up(pointer).await {
            tracing::error!(error = %e, "Initial archive import failed");
        }

        self.publish(SyncPhase::Idle).await;
        Ok(())
    }

    /// Run one full pass: poll live, write it through the gate, and catch up
    /// the archive if the station's pointer moved.
    ///
    /// # Errors
    ///
    /// Returns the first station or store error. The watermark is left as it
    /// was before the failing step.
    pub async fn tick(&mut self) -> AppResult<TickReport> {
        self.publish(SyncPhase::PollingLive).await;
        let result = self.run_tick().await;
        self.publish(SyncPhase::Idle).await;
        result
    }

    async fn run_tick(&mut self) -> AppResult<TickReport> {
        let live = self.station.live_conditions().await?;
        let live_write = self.gate.persist_live(self.store.as_ref(), &live).await?;

        let observed = live.next_archive_record;
        if !self.watermark.pointer_changed(observed) {
            tracing::debug!(pointer = ?observed, "Archive pointer unchanged");
            return Ok(TickReport {
                live_write,
                archive: ArchiveOutcome::NotNeeded,
            });
        }

        tracing::info!(
            previous = ?self.watermark.next_record_pointer,
            current = ?observed,
            "Archive pointer changed"
        );
        self.publish(SyncPhase::NeedsArchiveSync).await;

        let archive = self.catch_up(observed).await?;
        Ok(TickReport {
            live_write,
            archive,
        })
    }

    /// Fetch, parse and store archive records since the watermark. The
    /// watermark (timestamp and pointer) only moves after the store accepts
    /// a non-empty batch.
    async fn catch_up(&mut self, observed_pointer: Option<i64>) -> AppResult<ArchiveOutcome> {
        self.publish(SyncPhase::SyncingArchive).await;

        let since = self.watermark.last_archive_timestamp;
        let records = self.station.archive_since(since).await?;

        let Some(last) = records.last().map(|r| r.time) else {
            tracing::debug!(since = ?since, "No archive records returned");
            return Ok(ArchiveOutcome::Empty);
        };

        let written = self.store.upsert_archive(&records).await?;
        let advanced = self.watermark.record_persisted(last, observed_pointer);

        if !advanced {
            tracing::warn!(
                last = %last,
                watermark = ?self.watermark.last_archive_timestamp,
                "Archive batch ended before watermark, not moving it back"
            );
        }

        tracing::info!(
            count = records.len(),
            written,
            last = %last,
            "Imported archive records"
        );

        Ok(ArchiveOutcome::Imported {
            count: records.len(),
            last,
        })
    }
}
