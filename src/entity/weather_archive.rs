use sea_orm::entity::prelude::*;
use sea_orm::Set;
use serde::{Deserialize, Serialize};

use crate::station::ArchiveRecord;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "weather_archive")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub time: DateTimeUtc,
    pub temperature: Option<f64>,
    pub temperature_high: Option<f64>,
    pub temperature_low: Option<f64>,
    pub humidity: Option<i32>,
    pub dew_point: Option<f64>,
    pub wind_chill: Option<f64>,
    pub heat_index: Option<f64>,
    pub thsw_index: Option<f64>,
    pub barometer: Option<f64>,
    pub rainfall: Option<f64>,
    pub peak_rain_rate: Option<f64>,
    pub wind_samples: Option<i32>,
    pub average_wind_speed: Option<f64>,
    pub peak_wind_speed: Option<f64>,
    pub prevailing_wind_direction: Option<String>,
    pub peak_wind_direction: Option<String>,
    pub average_solar_radiation: Option<i32>,
    pub peak_solar_radiation: Option<i32>,
    pub average_uv_index: Option<i32>,
    pub peak_uv_index: Option<i32>,
    pub accumulated_et: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Every column except the primary key; used for upserts.
pub const VALUE_COLUMNS: [Column; 21] = [
    Column::Temperature,
    Column::TemperatureHigh,
    Column::TemperatureLow,
    Column::Humidity,
    Column::DewPoint,
    Column::WindChill,
    Column::HeatIndex,
    Column::ThswIndex,
    Column::Barometer,
    Column::Rainfall,
    Column::PeakRainRate,
    Column::WindSamples,
    Column::AverageWindSpeed,
    Column::PeakWindSpeed,
    Column::PrevailingWindDirection,
    Column::PeakWindDirection,
    Column::AverageSolarRadiation,
    Column::PeakSolarRadiation,
    Column::AverageUvIndex,
    Column::PeakUvIndex,
    Column::AccumulatedEt,
];

impl From<&ArchiveRecord> for ActiveModel {
    fn from(r: &ArchiveRecord) -> Self {
        Self {
            time: Set(r.time),
            temperature: Set(r.temperature),
            temperature_high: Set(r.temperature_high),
            temperature_low: Set(r.temperature_low),
            humidity: Set(r.humidity),
            dew_point: Set(r.dew_point),
            wind_chill: Set(r.wind_chill),
            heat_index: Set(r.heat_index),
            thsw_index: Set(r.thsw_index),
            barometer: Set(r.barometer),
            rainfall: Set(r.rainfall),
            peak_rain_rate: Set(r.peak_rain_rate),
            wind_samples: Set(r.wind_samples),
            average_wind_speed: Set(r.average_wind_speed),
            peak_wind_speed: Set(r.peak_wind_speed),
            prevailing_wind_direction: Set(r.prevailing_wind_direction.clone()),
            peak_wind_direction: Set(r.peak_wind_direction.clone()),
            average_solar_radiation: Set(r.average_solar_radiation),
            peak_solar_radiation: Set(r.peak_solar_radiation),
            average_uv_index: Set(r.average_uv_index),
            peak_uv_index: Set(r.peak_uv_index),
            accumulated_et: Set(r.accumulated_et),
        }
    }
}

impl From<Model> for ArchiveRecord {
    fn from(m: Model) -> Self {
        Self {
            time: m.time,
            temperature: m.temperature,
            temperature_high: m.temperature_high,
            temperature_low: m.temperature_low,
            humidity: m.humidity,
            dew_point: m.dew_point,
            wind_chill: m.wind_chill,
            heat_index: m.heat_index,
            thsw_index: m.thsw_index,
            barometer: m.barometer,
            rainfall: m.rainfall,
            peak_rain_rate: m.peak_rain_rate,
            wind_samples: m.wind_samples,
            average_wind_speed: m.average_wind_speed,
            peak_wind_speed: m.peak_wind_speed,
            prevailing_wind_direction: m.prevailing_wind_direction,
            peak_wind_direction: m.peak_wind_direction,
            average_solar_radiation: m.average_solar_radiation,
            peak_solar_radiation: m.peak_solar_radiation,
            average_uv_index: m.average_uv_index,
            peak_uv_index: m.peak_uv_index,
            accumulated_et: m.accumulated_et,
        }
    }
}
