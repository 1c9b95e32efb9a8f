use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::station::LiveConditions;

/// Slot key of the single current-conditions row.
pub const CURRENT_SLOT: &str = "current";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "live_weather")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub slot: String,
    pub recorded_at: DateTimeUtc,
    pub date: DateTimeUtc,
    pub barometer: Option<f64>,
    pub barometer_trend: Option<String>,
    pub temperature: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_direction: Option<i32>,
    pub wind_2min_average: Option<f64>,
    pub wind_10min_average: Option<f64>,
    pub wind_10min_max_speed: Option<f64>,
    pub wind_10min_max_direction: Option<i32>,
    pub humidity: Option<i32>,
    pub rain_rate: Option<f64>,
    pub is_raining: bool,
    pub storm_rain: Option<f64>,
    pub rain_last_15min: Option<f64>,
    pub rain_last_hour: Option<f64>,
    pub rain_today: Option<f64>,
    pub solar_radiation: Option<i32>,
    pub heat_index: Option<f64>,
    pub thsw_index: Option<f64>,
    pub console_battery: Option<f64>,
    pub next_archive_record: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub forecast: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every column except the slot key; a new poll overwrites all of them.
pub const VALUE_COLUMNS: [Column; 26] = [
    Column::RecordedAt,
    Column::Date,
    Column::Barometer,
    Column::BarometerTrend,
    Column::Temperature,
    Column::WindSpeed,
    Column::WindDirection,
    Column::Wind2minAverage,
    Column::Wind10minAverage,
    Column::Wind10minMaxSpeed,
    Column::Wind10minMaxDirection,
    Column::Humidity,
    Column::RainRate,
    Column::IsRaining,
    Column::StormRain,
    Column::RainLast15min,
    Column::RainLastHour,
    Column::RainToday,
    Column::SolarRadiation,
    Column::HeatIndex,
    Column::ThswIndex,
    Column::ConsoleBattery,
    Column::NextArchiveRecord,
    Column::Forecast,
    Column::Sunrise,
    Column::Sunset,
];

impl From<&LiveConditions> for ActiveModel {
    fn from(live: &LiveConditions) -> Self {
        Self {
            slot: Set(CURRENT_SLOT.to_string()),
            recorded_at: Set(live.id),
            date: Set(live.date),
            barometer: Set(live.barometer),
            barometer_trend: Set(live.barometer_trend.clone()),
            temperature: Set(live.temperature),
            wind_speed: Set(live.wind_speed),
            wind_direction: Set(live.wind_direction),
            wind_2min_average: Set(live.wind_2min_average),
            wind_10min_average: Set(live.wind_10min_average),
            wind_10min_max_speed: Set(live.wind_10min_max_speed),
            wind_10min_max_direction: Set(live.wind_10min_max_direction),
            humidity: Set(live.humidity),
            rain_rate: Set(live.rain_rate),
            is_raining: Set(live.is_raining),
            storm_rain: Set(live.storm_rain),
            rain_last_15min: Set(live.rain_last_15min),
            rain_last_hour: Set(live.rain_last_hour),
            rain_today: Set(live.rain_today),
            solar_radiation: Set(live.solar_radiation),
            heat_index: Set(live.heat_index),
            thsw_index: Set(live.thsw_index),
            console_battery: Set(live.console_battery),
            next_archive_record: Set(live.next_archive_record),
            forecast: Set(live.forecast.clone()),
            sunrise: Set(live.sunrise.clone()),
            sunset: Set(live.sunset.clone()),
        }
    }
}

impl From<Model> for LiveConditions {
    fn from(m: Model) -> Self {
        Self {
            id: m.recorded_at,
            date: m.date,
            barometer: m.barometer,
            barometer_trend: m.barometer_trend,
            temperature: m.temperature,
            wind_speed: m.wind_speed,
            wind_direction: m.wind_direction,
            wind_2min_average: m.wind_2min_average,
            wind_10min_average: m.wind_10min_average,
            wind_10min_max_speed: m.wind_10min_max_speed,
            wind_10min_max_direction: m.wind_10min_max_direction,
            humidity: m.humidity,
            rain_rate: m.rain_rate,
            is_raining: m.is_raining,
            storm_rain: m.storm_rain,
            rain_last_15min: m.rain_last_15min,
            rain_last_hour: m.rain_last_hour,
            rain_today: m.rain_today,
            solar_radiation: m.solar_radiation,
            heat_index: m.heat_index,
            thsw_index: m.thsw_index,
            console_battery: m.console_battery,
            next_archive_record: m.next_archive_record,
            forecast: m.forecast,
            sunrise: m.sunrise,
            sunset: m.sunset,
        }
    }
}
