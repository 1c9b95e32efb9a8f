//! Tests for the sync pass, its watermark handling and the scheduler guard.
//!
//! Run with: cargo test --test sync_worker_test

mod common;

use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use vantage_sync::common::{SharedStatus, SyncStatus};
use vantage_sync::station::{CommandKind, CommandOutput};
use vantage_sync::store::WeatherStore;
use vantage_sync::sync::scheduler::fire;
use vantage_sync::sync::{ArchiveOutcome, LiveWrite, PersistenceGate, SyncWorker};

use common::{archive_dump, archive_line, live_report, station, FixedClock, FlakyStore, ScriptedRunner};

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 19, hour, minute, 0).unwrap()
}

fn status() -> SharedStatus {
    Arc::new(RwLock::new(SyncStatus::default()))
}

struct Harness {
    runner: Arc<ScriptedRunner>,
    store: Arc<FlakyStore>,
    status: SharedStatus,
    worker: SyncWorker,
}

fn harness(clock_synced: bool) -> Harness {
    let runner = ScriptedRunner::new();
    let store = FlakyStore::new();
    let status = status();
    let gate = PersistenceGate::new(Arc::new(FixedClock(clock_synced)), true);
    let worker = SyncWorker::new(
        station(Arc::clone(&runner)),
        Arc::clone(&store) as Arc<dyn WeatherStore>,
        gate,
        Arc::clone(&status),
    );
    Harness {
        runner,
        store,
        status,
        worker,
    }
}

/// Bootstrapped harness: pointer 5, two archive records up to 10:05.
async fn bootstrapped() -> Harness {
    let mut h = harness(true);
    h.runner
        .push(CommandKind::LiveConditions, CommandOutput::success(live_report(5)));
    h.runner.push(
        CommandKind::ArchiveDump,
        archive_dump(&[
            archive_line("2026-10-19", "10:00", 60.0),
            archive_line("2026-10-19", "10:05", 61.0),
        ]),
    );
    h.worker.bootstrap().await.unwrap();
    h
}

#[tokio::test]
async fn bootstrap_seeds_watermark_without_storing_live() {
    let h = bootstrapped().await;

    assert_eq!(h.worker.watermark().next_record_pointer, Some(5));
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(10, 5)));
    assert_eq!(h.store.inner.archive_len().await, 2);
    assert!(h.store.current_live().await.unwrap().is_none());

    // Empty store: full history requested
    let dumps = h.runner.calls(CommandKind::ArchiveDump);
    assert_eq!(dumps.len(), 1);
    assert_eq!(dumps[0].args[1], "-a");

    let status = h.status.read().await;
    assert_eq!(status.last_live_write, Some(LiveWrite::Suppressed));
    assert_eq!(status.watermark.next_record_pointer, Some(5));
}

#[tokio::test]
async fn bootstrap_resumes_from_newest_stored_record() {
    let mut h = harness(true);
    h.store
        .upsert_archive(&[vantage_sync::station::ArchiveRecord::empty(at(9, 55))])
        .await
        .unwrap();
    h.runner
        .push(CommandKind::LiveConditions, CommandOutput::success(live_report(5)));
    h.runner.push(CommandKind::ArchiveDump, CommandOutput::success(""));

    h.worker.bootstrap().await.unwrap();

    let dumps = h.runner.calls(CommandKind::ArchiveDump);
    assert_eq!(dumps[0].args[1], "-a2026-10-19T09:55:00.000Z");
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(9, 55)));
}

#[tokio::test]
async fn bootstrap_tolerates_station_failures() {
    let mut h = harness(true);
    h.runner
        .push(CommandKind::LiveConditions, CommandOutput::failure(1, "no console"));
    h.runner
        .push(CommandKind::ArchiveDump, CommandOutput::failure(1, "no console"));

    h.worker.bootstrap().await.unwrap();

    assert_eq!(h.worker.watermark().next_record_pointer, None);
    assert_eq!(h.worker.watermark().last_archive_timestamp, None);
}

#[tokio::test]
async fn bootstrap_fails_when_store_is_unreadable() {
    let mut h = harness(true);
    h.runner
        .push(CommandKind::LiveConditions, CommandOutput::success(live_report(5)));
    h.store.fail_reads(true);

    assert!(h.worker.bootstrap().await.is_err());
}

#[tokio::test]
async fn unchanged_pointer_skips_archive_command() {
    let mut h = bootstrapped().await;

    for _ in 0..3 {
        let report = h.worker.tick().await.unwrap();
        assert_eq!(report.archive, ArchiveOutcome::NotNeeded);
        assert_eq!(report.live_write, LiveWrite::Stored);
    }

    assert_eq!(h.runner.calls(CommandKind::ArchiveDump).len(), 1);
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(10, 5)));

    let live = h.store.current_live().await.unwrap().unwrap();
    assert_eq!(live.next_archive_record, Some(5));
    assert_eq!(live.temperature, Some(20.3));
}

#[tokio::test]
async fn pointer_change_imports_since_watermark() {
    let mut h = bootstrapped().await;
    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner.set(
        CommandKind::ArchiveDump,
        archive_dump(&[archive_line("2026-10-19", "10:10", 62.0)]),
    );

    let report = h.worker.tick().await.unwrap();
    assert_eq!(
        report.archive,
        ArchiveOutcome::Imported {
            count: 1,
            last: at(10, 10)
        }
    );

    let dumps = h.runner.calls(CommandKind::ArchiveDump);
    assert_eq!(dumps.len(), 2);
    assert_eq!(dumps[1].args[1], "-a2026-10-19T10:05:00.000Z");

    assert_eq!(h.worker.watermark().next_record_pointer, Some(6));
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(10, 10)));
    assert_eq!(h.store.inner.archive_len().await, 3);
}

#[tokio::test]
async fn command_failure_leaves_watermark_and_retries() {
    let mut h = bootstrapped().await;
    let before = h.worker.watermark().clone();

    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner
        .set(CommandKind::ArchiveDump, CommandOutput::failure(1, "checksum error"));

    let err = h.worker.tick().await.unwrap_err();
    assert!(err.is_command_failure());
    assert_eq!(h.worker.watermark(), &before);

    // Next tick still sees a changed pointer and tries again
    h.runner.set(
        CommandKind::ArchiveDump,
        archive_dump(&[archive_line("2026-10-19", "10:10", 62.0)]),
    );
    h.worker.tick().await.unwrap();

    let dumps = h.runner.calls(CommandKind::ArchiveDump);
    assert_eq!(dumps.len(), 3);
    assert_eq!(dumps[2].args[1], "-a2026-10-19T10:05:00.000Z");
    assert_eq!(h.worker.watermark().next_record_pointer, Some(6));
}

#[tokio::test]
async fn empty_batch_leaves_watermark() {
    let mut h = bootstrapped().await;
    let before = h.worker.watermark().clone();

    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner.set(CommandKind::ArchiveDump, CommandOutput::success("\n"));

    let report = h.worker.tick().await.unwrap();
    assert_eq!(report.archive, ArchiveOutcome::Empty);
    assert_eq!(h.worker.watermark(), &before);

    h.worker.tick().await.unwrap();
    assert_eq!(h.runner.calls(CommandKind::ArchiveDump).len(), 3);
}

#[tokio::test]
async fn store_failure_leaves_watermark() {
    let mut h = bootstrapped().await;
    let before = h.worker.watermark().clone();

    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner.set(
        CommandKind::ArchiveDump,
        archive_dump(&[archive_line("2026-10-19", "10:10", 62.0)]),
    );
    h.store.fail_archive_writes(true);

    let err = h.worker.tick().await.unwrap_err();
    assert!(!err.is_command_failure());
    assert_eq!(h.worker.watermark(), &before);
    assert_eq!(h.store.inner.archive_len().await, 2);

    h.store.fail_archive_writes(false);
    h.worker.tick().await.unwrap();
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(10, 10)));
    assert_eq!(h.store.inner.archive_len().await, 3);
}

#[tokio::test]
async fn overlapping_batch_is_idempotent() {
    let mut h = bootstrapped().await;

    // Station repeats the boundary record along with a new one
    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner.set(
        CommandKind::ArchiveDump,
        archive_dump(&[
            archive_line("2026-10-19", "10:05", 61.0),
            archive_line("2026-10-19", "10:10", 62.0),
        ]),
    );

    h.worker.tick().await.unwrap();
    assert_eq!(h.store.inner.archive_len().await, 3);
    assert_eq!(h.worker.watermark().last_archive_timestamp, Some(at(10, 10)));
}

#[tokio::test]
async fn untrusted_clock_skips_live_write_but_syncs_archive() {
    let mut h = harness(false);
    h.runner
        .push(CommandKind::LiveConditions, CommandOutput::success(live_report(5)));
    h.runner.push(CommandKind::ArchiveDump, CommandOutput::success(""));
    h.worker.bootstrap().await.unwrap();

    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::success(live_report(6)));
    h.runner.set(
        CommandKind::ArchiveDump,
        archive_dump(&[archive_line("2026-10-19", "10:10", 62.0)]),
    );

    let report = h.worker.tick().await.unwrap();
    assert_eq!(report.live_write, LiveWrite::SkippedClockUntrusted);
    assert!(matches!(report.archive, ArchiveOutcome::Imported { count: 1, .. }));
    assert!(h.store.current_live().await.unwrap().is_none());
}

#[tokio::test]
async fn live_poll_failure_fails_the_pass() {
    let mut h = bootstrapped().await;
    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::failure(1, "timeout"));

    assert!(h.worker.tick().await.unwrap_err().is_command_failure());
    assert_eq!(h.worker.watermark().next_record_pointer, Some(5));
}

#[tokio::test]
async fn fire_skips_while_a_pass_holds_the_worker() {
    let h = bootstrapped().await;
    let status = Arc::clone(&h.status);
    let worker = Arc::new(Mutex::new(h.worker));

    let held = worker.lock().await;
    assert!(fire(&worker, &status).await.is_none());
    assert!(fire(&worker, &status).await.is_none());
    assert_eq!(status.read().await.skipped_ticks, 2);
    drop(held);

    let handle = fire(&worker, &status).await.expect("pass should start");
    handle.await.unwrap();

    let status = status.read().await;
    assert_eq!(status.skipped_ticks, 2);
    assert_eq!(status.last_tick_ok, Some(true));
    assert_eq!(status.last_live_write, Some(LiveWrite::Stored));
    assert!(status.last_tick_at.is_some());
}

#[tokio::test]
async fn failed_pass_is_recorded_in_status() {
    let h = bootstrapped().await;
    h.runner
        .set(CommandKind::LiveConditions, CommandOutput::failure(1, "no console"));
    let status = Arc::clone(&h.status);
    let worker = Arc::new(Mutex::new(h.worker));

    fire(&worker, &status).await.unwrap().await.unwrap();

    let status = status.read().await;
    assert_eq!(status.last_tick_ok, Some(false));
    assert!(status.last_error.as_deref().unwrap().contains("no console"));
}
