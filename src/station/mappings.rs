//! Static tables describing how console output maps onto record fields.
//!
//! Archive dumps are positional (one comma-separated line per record), live
//! reports are `Label = value` pairs. Each field also declares how its raw
//! text is coerced and which unit conversion applies.

use crate::units;

/// How a raw text value is coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Float,
    Int,
    Text,
    Flag,
    Date,
    Time,
}

/// Unit conversion applied after coercion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    None,
    /// inHg to mb
    Pressure,
    /// °F to °C
    Temperature,
    /// mph to knots
    Speed,
    /// hundredths of an inch to mm
    Rain,
}

impl Conversion {
    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Self::None => value,
            Self::Pressure => units::pressure_inhg_to_mb(value),
            Self::Temperature => units::temperature_f_to_c(value),
            Self::Speed => units::speed_mph_to_knots(value),
            Self::Rain => units::length_hundredths_in_to_mm(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveField {
    Date,
    Time,
    Temperature,
    TemperatureHigh,
    TemperatureLow,
    Rainfall,
    PeakRainRate,
    Barometer,
    AverageSolarRadiation,
    WindSamples,
    Humidity,
    AverageWindSpeed,
    PeakWindSpeed,
    PeakWindDirection,
    PrevailingWindDirection,
    AverageUvIndex,
    AccumulatedEt,
    PeakSolarRadiation,
    PeakUvIndex,
    WindChill,
    HeatIndex,
    ThswIndex,
}

impl ArchiveField {
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Date => FieldKind::Date,
            Self::Time => FieldKind::Time,
            Self::Temperature
            | Self::TemperatureHigh
            | Self::TemperatureLow
            | Self::Barometer
            | Self::WindChill
            | Self::HeatIndex
            | Self::ThswIndex => FieldKind::Float,
            Self::Rainfall
            | Self::PeakRainRate
            | Self::AverageSolarRadiation
            | Self::WindSamples
            | Self::Humidity
            | Self::AverageWindSpeed
            | Self::PeakWindSpeed
            | Self::AverageUvIndex
            | Self::AccumulatedEt
            | Self::PeakSolarRadiation
            | Self::PeakUvIndex => FieldKind::Int,
            Self::PeakWindDirection | Self::PrevailingWindDirection => FieldKind::Text,
        }
    }

    #[must_use]
    pub fn conversion(self) -> Conversion {
        match self {
            Self::Temperature
            | Self::TemperatureHigh
            | Self::TemperatureLow
            | Self::WindChill
            | Self::HeatIndex
            | Self::ThswIndex => Conversion::Temperature,
            Self::Barometer => Conversion::Pressure,
            Self::AverageWindSpeed | Self::PeakWindSpeed => Conversion::Speed,
            Self::Rainfall | Self::PeakRainRate => Conversion::Rain,
            _ => Conversion::None,
        }
    }
}

/// Column order of one `vproweather -a` line.
pub const ARCHIVE_FIELDS: [ArchiveField; 22] = [
    ArchiveField::Date,
    ArchiveField::Time,
    ArchiveField::Temperature,
    ArchiveField::TemperatureHigh,
    ArchiveField::TemperatureLow,
    ArchiveField::Rainfall,
    ArchiveField::PeakRainRate,
    ArchiveField::Barometer,
    ArchiveField::AverageSolarRadiation,
    ArchiveField::WindSamples,
    ArchiveField::Humidity,
    ArchiveField::AverageWindSpeed,
    ArchiveField::PeakWindSpeed,
    ArchiveField::PeakWindDirection,
    ArchiveField::PrevailingWindDirection,
    ArchiveField::AverageUvIndex,
    ArchiveField::AccumulatedEt,
    ArchiveField::PeakSolarRadiation,
    ArchiveField::PeakUvIndex,
    ArchiveField::WindChill,
    ArchiveField::HeatIndex,
    ArchiveField::ThswIndex,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveField {
    Barometer,
    BarometerTrend,
    Temperature,
    WindSpeed,
    WindDirection,
    Wind2minAverage,
    Wind10minAverage,
    Wind10minMaxSpeed,
    Wind10minMaxDirection,
    Humidity,
    RainRate,
    IsRaining,
    StormRain,
    RainLast15min,
    RainLastHour,
    RainToday,
    SolarRadiation,
    HeatIndex,
    ThswIndex,
    ConsoleBattery,
    NextArchiveRecord,
    Forecast,
    Sunrise,
    Sunset,
}

impl LiveField {
    #[must_use]
    pub fn kind(self) -> FieldKind {
        match self {
            Self::Barometer
            | Self::Temperature
            | Self::Wind2minAverage
            | Self::Wind10minAverage
            | Self::Wind10minMaxSpeed
            | Self::ConsoleBattery => FieldKind::Float,
            Self::WindSpeed
            | Self::WindDirection
            | Self::Wind10minMaxDirection
            | Self::Humidity
            | Self::RainRate
            | Self::StormRain
            | Self::RainLast15min
            | Self::RainLastHour
            | Self::RainToday
            | Self::SolarRadiation
            | Self::HeatIndex
            | Self::ThswIndex
            | Self::NextArchiveRecord => FieldKind::Int,
            Self::IsRaining => FieldKind::Flag,
            Self::BarometerTrend | Self::Forecast | Self::Sunrise | Self::Sunset => {
                FieldKind::Text
            }
        }
    }

    #[must_use]
    pub fn conversion(self) -> Conversion {
        match self {
            Self::Barometer => Conversion::Pressure,
            Self::Temperature | Self::HeatIndex | Self::ThswIndex => Conversion::Temperature,
            Self::WindSpeed
            | Self::Wind2minAverage
            | Self::Wind10minAverage
            | Self::Wind10minMaxSpeed => Conversion::Speed,
            Self::RainRate
            | Self::StormRain
            | Self::RainLast15min
            | Self::RainLastHour
            | Self::RainToday => Conversion::Rain,
            _ => Conversion::None,
        }
    }
}

/// Labels printed by `vproweather -x`, mapped to record fields.
pub const LIVE_FIELDS: &[(&str, LiveField)] = &[
    ("Bar", LiveField::Barometer),
    ("BarTrend", LiveField::BarometerTrend),
    ("OutsideTemp", LiveField::Temperature),
    ("WindSpeed", LiveField::WindSpeed),
    ("WindDir", LiveField::WindDirection),
    ("WindAvg2m", LiveField::Wind2minAverage),
    ("WindAvg10m", LiveField::Wind10minAverage),
    ("WindGust10m", LiveField::Wind10minMaxSpeed),
    ("WindGustDir10m", LiveField::Wind10minMaxDirection),
    ("OutsideHum", LiveField::Humidity),
    ("RainRate", LiveField::RainRate),
    ("IsRainingNow", LiveField::IsRaining),
    ("StormRain", LiveField::StormRain),
    ("RainLast15m", LiveField::RainLast15min),
    ("RainLastHour", LiveField::RainLastHour),
    ("RainToday", LiveField::RainToday),
    ("SolarRad", LiveField::SolarRadiation),
    ("HeatIndex", LiveField::HeatIndex),
    ("THSWIndex", LiveField::ThswIndex),
    ("ConsoleBattery", LiveField::ConsoleBattery),
    ("NextArchiveRecord", LiveField::NextArchiveRecord),
    ("Forecast", LiveField::Forecast),
    ("Sunrise", LiveField::Sunrise),
    ("Sunset", LiveField::Sunset),
];

/// Look up the record field for a station label. Unknown labels yield `None`.
#[must_use]
pub fn live_field(label: &str) -> Option<LiveField> {
    LIVE_FIELDS
        .iter()
        .find(|(key, _)| *key == label)
        .map(|(_, field)| *field)
}
