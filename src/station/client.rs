use chrono::{DateTime, Local, Utc};
use std::sync::Arc;

use crate::config::{ArchiveRequestPrecision, Config};
use crate::error::{AppError, AppResult};
use crate::station::command::{CommandKind, CommandRequest, CommandRunner};
use crate::station::models::{ArchiveRecord, LiveConditions};
use crate::station::parser;

/// Timezone the console's archive date/time columns are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StationTimezone {
    /// Host local time
    Local,
    Utc,
}

impl StationTimezone {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "utc" => Self::Utc,
            _ => Self::Local,
        }
    }
}

/// Format the since-bound of an archive dump request (always UTC).
#[must_use]
pub fn format_since(since: DateTime<Utc>, precision: ArchiveRequestPrecision) -> String {
    match precision {
        ArchiveRequestPrecision::Exact => since.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        ArchiveRequestPrecision::Minute => since.format("%Y-%m-%dT%H:%M:00.000Z").to_string(),
    }
}

/// Issues the three logical station commands through a `CommandRunner` and
/// parses their output.
pub struct StationClient {
    runner: Arc<dyn CommandRunner>,
    program: String,
    base_args: Vec<String>,
    serial_device: String,
    precision: ArchiveRequestPrecision,
    timezone: StationTimezone,
}

impl StationClient {
    #[must_use]
    pub fn new(config: &Config, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: config.vpro_command.clone(),
            base_args: config.vpro_args.clone(),
            serial_device: config.serial_device.clone(),
            precision: config.archive_request_precision,
            timezone: config.station_timezone,
        }
    }

    /// Build a client from explicit parts.
    #[must_use]
    pub fn with_parts(
        runner: Arc<dyn CommandRunner>,
        program: impl Into<String>,
        base_args: Vec<String>,
        serial_device: impl Into<String>,
        precision: ArchiveRequestPrecision,
        timezone: StationTimezone,
    ) -> Self {
        Self {
            runner,
            program: program.into(),
            base_args,
            serial_device: serial_device.into(),
            precision,
            timezone,
        }
    }

    fn request(&self, kind: CommandKind, flag: String) -> CommandRequest {
        let mut args = self.base_args.clone();
        args.push(flag);
        args.push(self.serial_device.clone());
        CommandRequest {
            kind,
            program: self.program.clone(),
            args,
        }
    }

    /// Build the archive dump request for the given lower bound.
    #[must_use]
    pub fn archive_request(&self, since: Option<DateTime<Utc>>) -> CommandRequest {
        let flag = match since {
            Some(ts) => format!("-a{}", format_since(ts, self.precision)),
            None => "-a".to_string(),
        };
        self.request(CommandKind::ArchiveDump, flag)
    }

    async fn run_stdout(&self, request: &CommandRequest) -> AppResult<String> {
        let output = self.runner.run(request).await?;
        output.into_stdout(&request.render())
    }

    /// Ask the console for its archive interval in minutes.
    ///
    /// # Errors
    ///
    /// Returns `AppError::ArchivePeriod` if the output carries no usable
    /// `archiveTime = <n>` line, or a command error if the probe fails.
    pub async fn archive_period(&self) -> AppResult<u32> {
        let request = self.request(CommandKind::ArchivePeriod, "-i".to_string());
        let stdout = self.run_stdout(&request).await?;

        parser::parse_archive_period(&stdout).ok_or_else(|| {
            AppError::ArchivePeriod(format!(
                "no `archiveTime = <n>` line in output of `{}`",
                request.render()
            ))
        })
    }

    /// Poll current conditions. The record is stamped with the host time at
    /// which the output was received.
    ///
    /// # Errors
    ///
    /// Returns a command error if the console command fails.
    pub async fn live_conditions(&self) -> AppResult<LiveConditions> {
        let request = self.request(CommandKind::LiveConditions, "-x".to_string());
        let stdout = self.run_stdout(&request).await?;
        Ok(parser::parse_live(&stdout, Utc::now()))
    }

    /// Dump archive records since `since`, or the full retained history
    /// when `since` is `None`.
    ///
    /// # Errors
    ///
    /// Returns a command error if the console command fails.
    pub async fn archive_since(&self, since: Option<DateTime<Utc>>) -> AppResult<Vec<ArchiveRecord>> {
        let request = self.archive_request(since);
        let stdout = self.run_stdout(&request).await?;

        Ok(match self.timezone {
            StationTimezone::Local => parser::parse_archive(&stdout, &Local),
            StationTimezone::Utc => parser::parse_archive(&stdout, &Utc),
        })
    }
}
