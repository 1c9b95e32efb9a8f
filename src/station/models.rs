use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Current conditions as reported by `vproweather -x`, converted to
/// metric/nautical units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LiveConditions {
    /// Poll time (host clock)
    pub id: DateTime<Utc>,
    pub date: DateTime<Utc>,
    /// Barometric pressure (mb)
    pub barometer: Option<f64>,
    pub barometer_trend: Option<String>,
    /// Outside temperature (°C)
    pub temperature: Option<f64>,
    /// Instantaneous wind speed (kn)
    pub wind_speed: Option<f64>,
    /// Wind direction (°)
    pub wind_direction: Option<i32>,
    pub wind_2min_average: Option<f64>,
    pub wind_10min_average: Option<f64>,
    /// Biggest gust in the last ten minutes (kn)
    pub wind_10min_max_speed: Option<f64>,
    pub wind_10min_max_direction: Option<i32>,
    /// Relative humidity (%)
    pub humidity: Option<i32>,
    /// Rain rate (mm/hr)
    pub rain_rate: Option<f64>,
    pub is_raining: bool,
    pub storm_rain: Option<f64>,
    pub rain_last_15min: Option<f64>,
    pub rain_last_hour: Option<f64>,
    pub rain_today: Option<f64>,
    /// Solar radiation (W/m²)
    pub solar_radiation: Option<i32>,
    pub heat_index: Option<f64>,
    /// THSW "feels like" index (°C)
    pub thsw_index: Option<f64>,
    /// Console battery voltage (V)
    pub console_battery: Option<f64>,
    /// Station-side slot of the next archive record; raw counter, used only
    /// to notice that a new archive record exists.
    pub next_archive_record: Option<i64>,
    pub forecast: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

impl LiveConditions {
    /// An empty record stamped with the poll time.
    #[must_use]
    pub fn empty(polled_at: DateTime<Utc>) -> Self {
        Self {
            id: polled_at,
            date: polled_at,
            barometer: None,
            barometer_trend: None,
            temperature: None,
            wind_speed: None,
            wind_direction: None,
            wind_2min_average: None,
            wind_10min_average: None,
            wind_10min_max_speed: None,
            wind_10min_max_direction: None,
            humidity: None,
            rain_rate: None,
            is_raining: false,
            storm_rain: None,
            rain_last_15min: None,
            rain_last_hour: None,
            rain_today: None,
            solar_radiation: None,
            heat_index: None,
            thsw_index: None,
            console_battery: None,
            next_archive_record: None,
            forecast: None,
            sunrise: None,
            sunset: None,
        }
    }
}

/// One completed archive interval from `vproweather -a`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ArchiveRecord {
    /// End of the archive interval, from the station's date and time
    pub time: DateTime<Utc>,
    /// Temperature (°C)
    pub temperature: Option<f64>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    /// Relative humidity (%)
    pub humidity: Option<i32>,
    /// Derived from temperature and humidity, never station-supplied (°C)
    pub dew_point: Option<f64>,
    pub wind_chill: Option<f64>,
    pub heat_index: Option<f64>,
    pub thsw_index: Option<f64>,
    /// Barometric pressure (mb)
    pub barometer: Option<f64>,
    /// Rainfall over the interval (mm)
    pub rainfall: Option<f64>,
    /// Peak rain rate over the interval (mm/hr)
    pub peak_rain_rate: Option<f64>,
    pub wind_samples: Option<i32>,
    /// Average wind speed (kn)
    pub average_wind_speed: Option<f64>,
    pub peak_wind_speed: Option<f64>,
    pub prevailing_wind_direction: Option<String>,
    pub peak_wind_direction: Option<String>,
    /// W/m²
    pub average_solar_radiation: Option<i32>,
    pub peak_solar_radiation: Option<i32>,
    pub average_uv_index: Option<i32>,
    pub peak_uv_index: Option<i32>,
    pub accumulated_et: Option<i32>,
}

impl ArchiveRecord {
    #[must_use]
    pub fn empty(time: DateTime<Utc>) -> Self {
        Self {
            time,
            temperature: None,
            temperature_high: None,
            temperature_low: None,
            humidity: None,
            dew_point: None,
            wind_chill: None,
            heat_index: None,
            thsw_index: None,
            barometer: None,
            rainfall: None,
            peak_rain_rate: None,
            wind_samples: None,
            average_wind_speed: None,
            peak_wind_speed: None,
            prevailing_wind_direction: None,
            peak_wind_direction: None,
            average_solar_radiation: None,
            peak_solar_radiation: None,
            average_uv_index: None,
            peak_uv_index: None,
            accumulated_et: None,
        }
    }
}
