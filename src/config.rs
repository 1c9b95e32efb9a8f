use std::env;
use std::path::PathBuf;

use crate::station::StationTimezone;

#[derive(Debug, Clone)]
pub enum Deployment {
    Local,
    Dev,
    Stage,
    Prod,
}

impl Deployment {
    #[must_use]
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Self::Dev,
            "stage" | "staging" => Self::Stage,
            "prod" | "production" => Self::Prod,
            _ => Self::Local,
        }
    }
}

/// Precision of the since-bound passed to the archive dump command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveRequestPrecision {
    /// Full instant, millisecond resolution
    Exact,
    /// Truncated to the minute
    Minute,
}

impl ArchiveRequestPrecision {
    /// Parse a precision name.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` for anything other than `exact` or `minute`.
    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "minute" => Ok(Self::Minute),
            other => Err(ConfigError::Invalid(
                "ARCHIVE_REQUEST_PRECISION",
                other.to_string(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database_url: String,

    // Station command
    pub vpro_command: String,
    pub vpro_args: Vec<String>,
    pub serial_device: String,
    pub station_timezone: StationTimezone,
    pub station_fixture_dir: Option<PathBuf>,
    pub command_timeout_seconds: u64,

    // Sync settings
    pub sync_interval_seconds: u64,
    pub archive_request_precision: ArchiveRequestPrecision,
    pub require_clock_sync: bool,
    pub clock_sync_command: Vec<String>,

    // API settings
    pub api_host: String,
    pub api_port: u16,

    // Application metadata
    pub log_format: LogFormat,
    pub deployment: Deployment,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if required environment variables are not set,
    /// or `ConfigError::Invalid` if an enumerated setting or a switch has an
    /// unknown value.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Unset and empty
    /// values fall back to defaults.
    ///
    /// # Errors
    ///
    /// Same as [`Config::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            // Database
            database_url: var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?,

            // Station command
            vpro_command: or("VPRO_COMMAND", "vproweather"),
            vpro_args: split_args(&or("VPRO_ARGS", "-d2")),
            serial_device: or("SERIAL_DEVICE", "/dev/ttyUSB0"),
            station_timezone: StationTimezone::from_str(&or("STATION_TIMEZONE", "local")),
            station_fixture_dir: var("STATION_FIXTURE_DIR").map(PathBuf::from),
            command_timeout_seconds: or("COMMAND_TIMEOUT_SECONDS", "120").parse().unwrap_or(120),

            // Sync settings
            sync_interval_seconds: or("SYNC_INTERVAL_SECONDS", "60")
                .parse()
                .ok()
                .filter(|&secs| secs > 0)
                .unwrap_or(60),
            archive_request_precision: ArchiveRequestPrecision::parse(&or(
                "ARCHIVE_REQUEST_PRECISION",
                "exact",
            ))?,
            require_clock_sync: parse_flag(
                "REQUIRE_CLOCK_SYNC",
                &or("REQUIRE_CLOCK_SYNC", "true"),
            )?,
            clock_sync_command: split_args(&or(
                "CLOCK_SYNC_COMMAND",
                "timedatectl show --property=NTPSynchronized --value",
            )),

            // API settings
            api_host: or("API_HOST", "0.0.0.0"),
            api_port: or("API_PORT", "3000").parse().unwrap_or(3000),

            // Application metadata
            log_format: match or("LOG_FORMAT", "text").to_lowercase().as_str() {
                "json" => LogFormat::Json,
                _ => LogFormat::Text,
            },
            deployment: Deployment::from_str(&or("DEPLOYMENT", "local")),
        })
    }

    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

/// Parse a boolean switch. Accepts `true`/`false`, `yes`/`no`, `on`/`off`
/// and `1`/`0`, case-insensitively.
fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        other => Err(ConfigError::Invalid(name, other.to_string())),
    }
}

fn split_args(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
