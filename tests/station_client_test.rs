//! Tests for station command construction and output handling.
//!
//! Run with: cargo test --test station_client_test

mod common;

use chrono::{TimeZone, Utc};
use std::sync::Arc;
use vantage_sync::config::ArchiveRequestPrecision;
use vantage_sync::error::AppError;
use vantage_sync::station::client::format_since;
use vantage_sync::station::command::FixtureRunner;
use vantage_sync::station::{
    CommandKind, CommandOutput, CommandRequest, CommandRunner, StationClient, StationTimezone,
};

use common::{archive_dump, archive_line, live_report, station, ScriptedRunner};

#[test]
fn since_bound_formats() {
    let ts = Utc.with_ymd_and_hms(2026, 10, 19, 10, 5, 42).unwrap()
        + chrono::Duration::milliseconds(123);

    assert_eq!(
        format_since(ts, ArchiveRequestPrecision::Exact),
        "2026-10-19T10:05:42.123Z"
    );
    assert_eq!(
        format_since(ts, ArchiveRequestPrecision::Minute),
        "2026-10-19T10:05:00.000Z"
    );
}

#[test]
fn archive_request_arguments() {
    let client = station(ScriptedRunner::new());

    let full = client.archive_request(None);
    assert_eq!(full.kind, CommandKind::ArchiveDump);
    assert_eq!(full.program, "vproweather");
    assert_eq!(full.args, ["-d2", "-a", "/dev/ttyUSB0"]);

    let ts = Utc.with_ymd_and_hms(2026, 10, 19, 10, 5, 0).unwrap();
    let since = client.archive_request(Some(ts));
    assert_eq!(since.args, ["-d2", "-a2026-10-19T10:05:00.000Z", "/dev/ttyUSB0"]);
    assert_eq!(
        since.render(),
        "vproweather -d2 -a2026-10-19T10:05:00.000Z /dev/ttyUSB0"
    );
}

#[tokio::test]
async fn archive_period_probe() {
    let runner = ScriptedRunner::new();
    runner.push(
        CommandKind::ArchivePeriod,
        CommandOutput::success("Model = VantagePro2\narchiveTime = 10\n"),
    );
    let client = station(Arc::clone(&runner));

    assert_eq!(client.archive_period().await.unwrap(), 10);
    assert_eq!(runner.calls(CommandKind::ArchivePeriod)[0].args, ["-d2", "-i", "/dev/ttyUSB0"]);
}

#[tokio::test]
async fn archive_period_without_match_is_an_error() {
    let runner = ScriptedRunner::new();
    runner.push(CommandKind::ArchivePeriod, CommandOutput::success("nothing useful\n"));
    let client = station(runner);

    let err = client.archive_period().await.unwrap_err();
    assert!(matches!(err, AppError::ArchivePeriod(_)));
}

#[tokio::test]
async fn failed_command_carries_exit_details() {
    let runner = ScriptedRunner::new();
    runner.push(
        CommandKind::LiveConditions,
        CommandOutput::failure(2, "cannot open /dev/ttyUSB0"),
    );
    let client = station(runner);

    let err = client.live_conditions().await.unwrap_err();
    assert!(err.is_command_failure());
    match err {
        AppError::Command { code, stderr, .. } => {
            assert_eq!(code, Some(2));
            assert!(stderr.contains("/dev/ttyUSB0"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn live_and_archive_are_parsed() {
    let runner = ScriptedRunner::new();
    runner.push(CommandKind::LiveConditions, CommandOutput::success(live_report(42)));
    runner.push(
        CommandKind::ArchiveDump,
        archive_dump(&[
            archive_line("2026-10-19", "10:00", 60.0),
            archive_line("2026-10-19", "10:05", 61.0),
        ]),
    );
    let client = station(Arc::clone(&runner));

    let live = client.live_conditions().await.unwrap();
    assert_eq!(live.next_archive_record, Some(42));
    assert_eq!(runner.calls(CommandKind::LiveConditions)[0].args[1], "-x");

    let records = client.archive_since(None).await.unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn fixture_runner_replays_files() {
    let dir = std::env::temp_dir().join(format!("vantage-sync-fixtures-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("archivePeriod.out"), "archiveTime = 5\n").unwrap();
    std::fs::write(dir.join("liveRecord.out"), live_report(7)).unwrap();

    let client = StationClient::with_parts(
        Arc::new(FixtureRunner::new(&dir)),
        "vproweather",
        Vec::new(),
        "/dev/ttyUSB0",
        ArchiveRequestPrecision::Exact,
        StationTimezone::Utc,
    );

    assert_eq!(client.archive_period().await.unwrap(), 5);
    assert_eq!(
        client.live_conditions().await.unwrap().next_archive_record,
        Some(7)
    );
    // No archiveRecord.out in the directory
    assert!(client.archive_since(None).await.unwrap_err().is_command_failure());

    let other = CommandRequest {
        kind: CommandKind::Other,
        program: "timedatectl".to_string(),
        args: Vec::new(),
    };
    let output = FixtureRunner::new(&dir).run(&other).await.unwrap();
    assert!(!output.is_success());

    std::fs::remove_dir_all(&dir).ok();
}
