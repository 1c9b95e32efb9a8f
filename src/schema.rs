//! Descriptive metadata for the two persisted collections: field types,
//! display labels and unit suffixes. Consumed by clients rendering the data;
//! the tables themselves come from the `migration` crate.

use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    Date,
    Number,
    String,
    Boolean,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FieldDescriptor {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CollectionSchema {
    pub name: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub fields: Vec<FieldDescriptor>,
}

const fn field(
    name: &'static str,
    field_type: FieldType,
    label: &'static str,
    suffix: Option<&'static str>,
) -> FieldDescriptor {
    FieldDescriptor {
        name,
        field_type,
        label,
        description: None,
        suffix,
    }
}

const fn described(mut descriptor: FieldDescriptor, description: &'static str) -> FieldDescriptor {
    descriptor.description = Some(description);
    descriptor
}

#[must_use]
pub fn live_weather_schema() -> CollectionSchema {
    use FieldType::{Boolean, Date, Number, String};

    CollectionSchema {
        name: "live_weather",
        label: "Live Weather",
        description: "Current conditions at the station",
        fields: vec![
            described(field("id", Date, "Time", None), "Time that the data was recorded"),
            described(field("date", Date, "Date", None), "Date that the data was recorded"),
            field("barometer", Number, "Barometer", Some("mb")),
            field("barometer_trend", String, "Barometer Trend", None),
            field("temperature", Number, "Temperature", Some("°C")),
            described(
                field("wind_speed", Number, "Wind Speed", Some("knots")),
                "Wind speed at time of recording",
            ),
            described(
                field("wind_direction", Number, "Wind Direction", Some("°")),
                "Wind direction at time of recording",
            ),
            field("wind_2min_average", Number, "Two-minute Average Wind Speed", Some("knots")),
            field("wind_10min_average", Number, "Ten-minute Average Wind Speed", Some("knots")),
            field("wind_10min_max_speed", Number, "Biggest Gust in Last Ten Minutes", Some("knots")),
            field(
                "wind_10min_max_direction",
                Number,
                "Direction of Biggest Gust in Last Ten Minutes",
                Some("°"),
            ),
            field("humidity", Number, "Humidity", Some("%")),
            described(
                field("rain_rate", Number, "Rain Rate", Some("mm/hr")),
                "Rain rate at time of recording",
            ),
            field("is_raining", Boolean, "Is Raining", None),
            field("storm_rain", Number, "Storm Rain", Some("mm")),
            field("rain_last_15min", Number, "Rain in Last 15 Minutes", Some("mm")),
            field("rain_last_hour", Number, "Rain in Last Hour", Some("mm")),
            field("rain_today", Number, "Rain Today", Some("mm")),
            field("solar_radiation", Number, "Solar Radiation", Some("W/m^2")),
            field("heat_index", Number, "Heat Index", Some("°C")),
            described(
                field("thsw_index", Number, "Feels Like Temperature", Some("°C")),
                "THSW Index",
            ),
            field("console_battery", Number, "Battery Voltage", Some("V")),
            field("next_archive_record", Number, "Next Archive Record", None),
            field("forecast", String, "Forecast", None),
            field("sunrise", String, "Sunrise", None),
            field("sunset", String, "Sunset", None),
        ],
    }
}

#[must_use]
pub fn weather_archive_schema() -> CollectionSchema {
    use FieldType::{Date, Number, String};

    CollectionSchema {
        name: "weather_archive",
        label: "Weather Records",
        description: "Archived weather records from the station",
        fields: vec![
            field("time", Date, "Record Datetime", None),
            field("temperature", Number, "Temperature", Some("°C")),
            field("temperature_high", Number, "Temperature High", Some("°C")),
            field("temperature_low", Number, "Temperature Low", Some("°C")),
            field("humidity", Number, "Humidity", Some("%")),
            field("dew_point", Number, "Dew Point", Some("°C")),
            field("wind_chill", Number, "Wind Chill", Some("°C")),
            field("heat_index", Number, "Heat Index", Some("°C")),
            field("thsw_index", Number, "THSW Index", Some("°C")),
            field("barometer", Number, "Barometer", Some("mb")),
            described(
                field("rainfall", Number, "Rainfall", Some("mm")),
                "Rainfall over period",
            ),
            described(
                field("peak_rain_rate", Number, "Peak Rain Rate", Some("mm/hr")),
                "Peak rain rate over period",
            ),
            described(
                field("wind_samples", Number, "Wind Samples", None),
                "Number of wind samples taken",
            ),
            field("average_wind_speed", Number, "Average Wind Speed", Some("knots")),
            field("peak_wind_speed", Number, "Peak Wind Speed", Some("knots")),
            field("prevailing_wind_direction", String, "Prevailing Wind Direction", None),
            field("peak_wind_direction", String, "Direction of Peak Wind Speed", None),
            field("average_solar_radiation", Number, "Average Solar Radiation", Some("W/m^2")),
            field("peak_solar_radiation", Number, "Peak Solar Radiation", Some("W/m^2")),
            field("average_uv_index", Number, "Average UV Index", None),
            field("peak_uv_index", Number, "Peak UV Index", None),
            field("accumulated_et", Number, "Accumulated ET", None),
        ],
    }
}
