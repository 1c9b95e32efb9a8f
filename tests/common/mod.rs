//! Shared fakes for the integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use vantage_sync::clock::ClockOracle;
use vantage_sync::config::ArchiveRequestPrecision;
use vantage_sync::error::{AppError, AppResult};
use vantage_sync::station::{
    ArchiveRecord, CommandKind, CommandOutput, CommandRequest, CommandRunner, LiveConditions,
    StationClient, StationTimezone,
};
use vantage_sync::store::{ArchiveQuery, MemoryStore, WeatherStore};

/// Command runner that replays scripted outputs per command kind. The last
/// scripted output for a kind repeats once the queue is down to it.
#[derive(Default)]
pub struct ScriptedRunner {
    scripts: Mutex<HashMap<CommandKind, VecDeque<CommandOutput>>>,
    calls: Mutex<Vec<CommandRequest>>,
}

impl ScriptedRunner {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push(&self, kind: CommandKind, output: CommandOutput) {
        self.scripts
            .lock()
            .unwrap()
            .entry(kind)
            .or_default()
            .push_back(output);
    }

    /// Replace whatever is queued for `kind`.
    pub fn set(&self, kind: CommandKind, output: CommandOutput) {
        self.scripts
            .lock()
            .unwrap()
            .insert(kind, VecDeque::from([output]));
    }

    pub fn calls(&self, kind: CommandKind) -> Vec<CommandRequest> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.kind == kind)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, request: &CommandRequest) -> AppResult<CommandOutput> {
        self.calls.lock().unwrap().push(request.clone());

        let mut scripts = self.scripts.lock().unwrap();
        let output = match scripts.get_mut(&request.kind) {
            Some(queue) if queue.len() > 1 => queue.pop_front(),
            Some(queue) => queue.front().cloned(),
            None => None,
        };
        Ok(output.unwrap_or_else(|| CommandOutput::failure(1, "unscripted command")))
    }
}

/// Clock oracle with a fixed answer.
pub struct FixedClock(pub bool);

#[async_trait]
impl ClockOracle for FixedClock {
    async fn is_synchronized(&self) -> bool {
        self.0
    }
}

/// In-memory store whose writes can be made to fail.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub fail_archive_writes: AtomicBool,
    pub fail_reads: AtomicBool,
}

impl FlakyStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_archive_writes(&self, fail: bool) {
        self.fail_archive_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> AppResult<()> {
        if flag.load(Ordering::SeqCst) {
            Err(AppError::Store("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl WeatherStore for FlakyStore {
    async fn upsert_live(&self, live: &LiveConditions) -> AppResult<()> {
        self.inner.upsert_live(live).await
    }

    async fn current_live(&self) -> AppResult<Option<LiveConditions>> {
        self.inner.current_live().await
    }

    async fn upsert_archive(&self, records: &[ArchiveRecord]) -> AppResult<u64> {
        Self::check(&self.fail_archive_writes)?;
        self.inner.upsert_archive(records).await
    }

    async fn latest_archive_time(&self) -> AppResult<Option<DateTime<Utc>>> {
        Self::check(&self.fail_reads)?;
        self.inner.latest_archive_time().await
    }

    async fn archive_range(&self, query: &ArchiveQuery) -> AppResult<Vec<ArchiveRecord>> {
        self.inner.archive_range(query).await
    }
}

/// Station client reading archive times as UTC.
pub fn station(runner: Arc<ScriptedRunner>) -> StationClient {
    StationClient::with_parts(
        runner,
        "vproweather",
        vec!["-d2".to_string()],
        "/dev/ttyUSB0",
        ArchiveRequestPrecision::Exact,
        StationTimezone::Utc,
    )
}

/// A `vproweather -x` report with the given archive pointer.
pub fn live_report(pointer: i64) -> String {
    format!(
        "rtBaroCurr = 29.92\n\
         Bar = 29.92\n\
         BarTrend = Steady\n\
         OutsideTemp = 68.5\n\
         WindSpeed = 5\n\
         WindDir = 270\n\
         OutsideHum = 80\n\
         RainRate = 0\n\
         IsRainingNow = no\n\
         RainToday = 10\n\
         Forecast = Mostly clear\n\
         NextArchiveRecord = {pointer}\n"
    )
}

/// One 22-field archive line; temperature in °F.
pub fn archive_line(date: &str, time: &str, temp_f: f64) -> String {
    format!(
        "{date},{time},{temp_f},{temp_f},{temp_f},2,4,29.92,350,120,80,10,20,NW,N,3,1,500,4,{temp_f},{temp_f},{temp_f}"
    )
}

pub fn archive_dump(lines: &[String]) -> CommandOutput {
    CommandOutput::success(lines.join("\n"))
}
