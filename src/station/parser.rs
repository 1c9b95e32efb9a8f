//! Turns raw `vproweather` output into typed, converted records.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;

use crate::station::mappings::{
    live_field, ArchiveField, Conversion, FieldKind, LiveField, ARCHIVE_FIELDS,
};
use crate::station::models::{ArchiveRecord, LiveConditions};
use crate::units;

static ARCHIVE_TIME_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^archiveTime = (\d+)$").expect("Invalid archiveTime regex"));

// Greedy key: "a = b = c" splits as ("a = b", "c").
static LIVE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*) = (.*)$").expect("Invalid live line regex"));

/// Parse a float; empty, unparseable or non-finite text yields `None`.
#[must_use]
pub fn parse_float(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse an integer; a finite decimal is truncated toward zero, anything
/// else that isn't an integer yields `None`.
#[must_use]
pub fn parse_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(|v| v.trunc() as i64)
    })
}

/// A raw token coerced according to its field kind.
#[derive(Debug, Clone, PartialEq)]
enum Coerced {
    /// Converted measurement
    Number(f64),
    /// Unconverted integer (counts, indices, directions)
    Count(i64),
    Text(String),
    Flag(bool),
}

impl Coerced {
    fn number(self) -> Option<f64> {
        match self {
            Self::Number(v) => Some(v),
            Self::Count(v) => Some(v as f64),
            _ => None,
        }
    }

    fn count(self) -> Option<i64> {
        match self {
            Self::Count(v) => Some(v),
            _ => None,
        }
    }

    fn small_count(self) -> Option<i32> {
        self.count().and_then(|v| i32::try_from(v).ok())
    }

    fn text(self) -> Option<String> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    fn flag(self) -> bool {
        matches!(self, Self::Flag(true))
    }
}

fn coerce(raw: &str, kind: FieldKind, conversion: Conversion) -> Option<Coerced> {
    match kind {
        FieldKind::Float => parse_float(raw).map(|v| Coerced::Number(conversion.apply(v))),
        FieldKind::Int => parse_int(raw).map(|v| match conversion {
            Conversion::None => Coerced::Count(v),
            other => Coerced::Number(other.apply(v as f64)),
        }),
        FieldKind::Text | FieldKind::Date | FieldKind::Time => {
            let trimmed = raw.trim();
            (!trimmed.is_empty()).then(|| Coerced::Text(trimmed.to_string()))
        }
        FieldKind::Flag => Some(Coerced::Flag(raw.trim() == "yes")),
    }
}

/// Find the archive interval (minutes) in `vproweather -i` output.
#[must_use]
pub fn parse_archive_period(stdout: &str) -> Option<u32> {
    stdout.lines().find_map(|line| {
        ARCHIVE_TIME_LINE
            .captures(line)
            .and_then(|caps| caps[1].parse().ok())
    })
}

/// Combine the station's date and time columns into one instant, reading
/// them as wall-clock time in `tz`.
pub fn archive_timestamp<Tz: TimeZone>(date: &str, time: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .ok()?;
    tz.from_local_datetime(&NaiveDateTime::new(date, time))
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Parse one archive line. Lines whose field count differs from the mapping,
/// or whose date/time cannot be read, yield `None`.
pub fn parse_archive_line<Tz: TimeZone>(line: &str, tz: &Tz) -> Option<ArchiveRecord> {
    let tokens: Vec<&str> = line.split(',').collect();
    if tokens.len() != ARCHIVE_FIELDS.len() {
        return None;
    }

    let mut date = "";
    let mut time = "";
    for (&field, &token) in ARCHIVE_FIELDS.iter().zip(&tokens) {
        match field.kind() {
            FieldKind::Date => date = token,
            FieldKind::Time => time = token,
            _ => {}
        }
    }

    let mut record = ArchiveRecord::empty(archive_timestamp(date, time, tz)?);

    for (&field, &token) in ARCHIVE_FIELDS.iter().zip(&tokens) {
        let value = || coerce(token, field.kind(), field.conversion());
        let number = || value().and_then(Coerced::number);
        let count = || value().and_then(Coerced::small_count);
        let text = || value().and_then(Coerced::text);
        match field {
            ArchiveField::Date | ArchiveField::Time => {}
            ArchiveField::Temperature => record.temperature = number(),
            ArchiveField::TemperatureHigh => record.temperature_high = number(),
            ArchiveField::TemperatureLow => record.temperature_low = number(),
            ArchiveField::Rainfall => record.rainfall = number(),
            ArchiveField::PeakRainRate => record.peak_rain_rate = number(),
            ArchiveField::Barometer => record.barometer = number(),
            ArchiveField::AverageSolarRadiation => record.average_solar_radiation = count(),
            ArchiveField::WindSamples => record.wind_samples = count(),
            ArchiveField::Humidity => record.humidity = count(),
            ArchiveField::AverageWindSpeed => record.average_wind_speed = number(),
            ArchiveField::PeakWindSpeed => record.peak_wind_speed = number(),
            ArchiveField::PeakWindDirection => record.peak_wind_direction = text(),
            ArchiveField::PrevailingWindDirection => {
                record.prevailing_wind_direction = text();
            }
            ArchiveField::AverageUvIndex => record.average_uv_index = count(),
            ArchiveField::AccumulatedEt => record.accumulated_et = count(),
            ArchiveField::PeakSolarRadiation => record.peak_solar_radiation = count(),
            ArchiveField::PeakUvIndex => record.peak_uv_index = count(),
            ArchiveField::WindChill => record.wind_chill = number(),
            ArchiveField::HeatIndex => record.heat_index = number(),
            ArchiveField::ThswIndex => record.thsw_index = number(),
        }
    }

    record.dew_point = match (record.temperature, record.humidity) {
        (Some(t), Some(h)) => Some(units::approximate_dew_point(t, f64::from(h))),
        _ => None,
    };

    Some(record)
}

/// Parse a full archive dump. Output order follows input order (the
/// station prints oldest first); malformed lines are dropped.
pub fn parse_archive<Tz: TimeZone>(stdout: &str, tz: &Tz) -> Vec<ArchiveRecord> {
    let mut dropped = 0usize;
    let records: Vec<ArchiveRecord> = stdout
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| {
            let record = parse_archive_line(line, tz);
            if record.is_none() {
                dropped += 1;
            }
            record
        })
        .collect();

    if dropped > 0 {
        tracing::debug!(dropped, kept = records.len(), "Dropped malformed archive lines");
    }

    records
}

/// Parse a `vproweather -x` report. Lines that aren't `Label = value`, or
/// whose label is unknown, are ignored.
#[must_use]
pub fn parse_live(stdout: &str, polled_at: DateTime<Utc>) -> LiveConditions {
    let mut record = LiveConditions::empty(polled_at);

    for line in stdout.lines() {
        let Some(caps) = LIVE_LINE.captures(line) else {
            continue;
        };
        let Some(field) = live_field(caps[1].trim()) else {
            continue;
        };
        let raw = &caps[2];
        let value = || coerce(raw, field.kind(), field.conversion());
        let number = || value().and_then(Coerced::number);
        let count = || value().and_then(Coerced::small_count);
        let text = || value().and_then(Coerced::text);

        match field {
            LiveField::Barometer => record.barometer = number(),
            LiveField::BarometerTrend => record.barometer_trend = text(),
            LiveField::Temperature => record.temperature = number(),
            LiveField::WindSpeed => record.wind_speed = number(),
            LiveField::WindDirection => record.wind_direction = count(),
            LiveField::Wind2minAverage => record.wind_2min_average = number(),
            LiveField::Wind10minAverage => record.wind_10min_average = number(),
            LiveField::Wind10minMaxSpeed => record.wind_10min_max_speed = number(),
            LiveField::Wind10minMaxDirection => record.wind_10min_max_direction = count(),
            LiveField::Humidity => record.humidity = count(),
            LiveField::RainRate => record.rain_rate = number(),
            LiveField::IsRaining => record.is_raining = value().is_some_and(Coerced::flag),
            LiveField::StormRain => record.storm_rain = number(),
            LiveField::RainLast15min => record.rain_last_15min = number(),
            LiveField::RainLastHour => record.rain_last_hour = number(),
            LiveField::RainToday => record.rain_today = number(),
            LiveField::SolarRadiation => record.solar_radiation = count(),
            LiveField::HeatIndex => record.heat_index = number(),
            LiveField::ThswIndex => record.thsw_index = number(),
            LiveField::ConsoleBattery => record.console_battery = number(),
            LiveField::NextArchiveRecord => {
                record.next_archive_record = value().and_then(Coerced::count);
            }
            LiveField::Forecast => record.forecast = text(),
            LiveField::Sunrise => record.sunrise = text(),
            LiveField::Sunset => record.sunset = text(),
        }
    }

    record
}
