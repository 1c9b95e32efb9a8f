use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ========== LIVE WEATHER ==========
        // Single logical row keyed by slot; overwritten on every accepted poll.
        manager
            .create_table(
                Table::create()
                    .table(LiveWeather::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LiveWeather::Slot)
                            .string_len(16)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(LiveWeather::RecordedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(LiveWeather::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(LiveWeather::Barometer).double())
                    .col(ColumnDef::new(LiveWeather::BarometerTrend).string_len(64))
                    .col(ColumnDef::new(LiveWeather::Temperature).double())
                    .col(ColumnDef::new(LiveWeather::WindSpeed).double())
                    .col(ColumnDef::new(LiveWeather::WindDirection).integer())
                    .col(ColumnDef::new(LiveWeather::Wind2minAverage).double())
                    .col(ColumnDef::new(LiveWeather::Wind10minAverage).double())
                    .col(ColumnDef::new(LiveWeather::Wind10minMaxSpeed).double())
                    .col(ColumnDef::new(LiveWeather::Wind10minMaxDirection).integer())
                    .col(ColumnDef::new(LiveWeather::Humidity).integer())
                    .col(ColumnDef::new(LiveWeather::RainRate).double())
                    .col(
                        ColumnDef::new(LiveWeather::IsRaining)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(LiveWeather::StormRain).double())
                    .col(ColumnDef::new(LiveWeather::RainLast15min).double())
                    .col(ColumnDef::new(LiveWeather::RainLastHour).double())
                    .col(ColumnDef::new(LiveWeather::RainToday).double())
                    .col(ColumnDef::new(LiveWeather::SolarRadiation).integer())
                    .col(ColumnDef::new(LiveWeather::HeatIndex).double())
                    .col(ColumnDef::new(LiveWeather::ThswIndex).double())
                    .col(ColumnDef::new(LiveWeather::ConsoleBattery).double())
                    .col(ColumnDef::new(LiveWeather::NextArchiveRecord).big_integer())
                    .col(ColumnDef::new(LiveWeather::Forecast).text())
                    .col(ColumnDef::new(LiveWeather::Sunrise).string_len(16))
                    .col(ColumnDef::new(LiveWeather::Sunset).string_len(16))
                    .to_owned(),
            )
            .await?;

        // ========== WEATHER ARCHIVE ==========
        manager
            .create_table(
                Table::create()
                    .table(WeatherArchive::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeatherArchive::Time)
                            .timestamp_with_time_zone()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeatherArchive::Temperature).double())
                    .col(ColumnDef::new(WeatherArchive::TemperatureHigh).double())
                    .col(ColumnDef::new(WeatherArchive::TemperatureLow).double())
                    .col(ColumnDef::new(WeatherArchive::Humidity).integer())
                    .col(ColumnDef::new(WeatherArchive::DewPoint).double())
                    .col(ColumnDef::new(WeatherArchive::WindChill).double())
                    .col(ColumnDef::new(WeatherArchive::HeatIndex).double())
                    .col(ColumnDef::new(WeatherArchive::ThswIndex).double())
                    .col(ColumnDef::new(WeatherArchive::Barometer).double())
                    .col(ColumnDef::new(WeatherArchive::Rainfall).double())
                    .col(ColumnDef::new(WeatherArchive::PeakRainRate).double())
                    .col(ColumnDef::new(WeatherArchive::WindSamples).integer())
                    .col(ColumnDef::new(WeatherArchive::AverageWindSpeed).double())
                    .col(ColumnDef::new(WeatherArchive::PeakWindSpeed).double())
                    .col(ColumnDef::new(WeatherArchive::PrevailingWindDirection).string_len(8))
                    .col(ColumnDef::new(WeatherArchive::PeakWindDirection).string_len(8))
                    .col(ColumnDef::new(WeatherArchive::AverageSolarRadiation).integer())
                    .col(ColumnDef::new(WeatherArchive::PeakSolarRadiation).integer())
                    .col(ColumnDef::new(WeatherArchive::AverageUvIndex).integer())
                    .col(ColumnDef::new(WeatherArchive::PeakUvIndex).integer())
                    .col(ColumnDef::new(WeatherArchive::AccumulatedEt).integer())
                    .to_owned(),
            )
            .await?;

        // Descending scans for the watermark seed and the archive API
        manager
            .create_index(
                Index::create()
                    .name("weather_archive_time_desc_idx")
                    .table(WeatherArchive::Table)
                    .col((WeatherArchive::Time, IndexOrder::Desc))
                    .if_not_exists()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(WeatherArchive::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(LiveWeather::Table).if_exists().to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum LiveWeather {
    Table,
    Slot,
    RecordedAt,
    Date,
    Barometer,
    BarometerTrend,
    Temperature,
    WindSpeed,
    WindDirection,
    #[sea_orm(iden = "wind_2min_average")]
    Wind2minAverage,
    #[sea_orm(iden = "wind_10min_average")]
    Wind10minAverage,
    #[sea_orm(iden = "wind_10min_max_speed")]
    Wind10minMaxSpeed,
    #[sea_orm(iden = "wind_10min_max_direction")]
    Wind10minMaxDirection,
    Humidity,
    RainRate,
    IsRaining,
    StormRain,
    #[sea_orm(iden = "rain_last_15min")]
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

#[derive(DeriveIden)]
pub enum WeatherArchive {
    Table,
    Time,
    Temperature,
    TemperatureHigh,
    TemperatureLow,
    Humidity,
    DewPoint,
    WindChill,
    HeatIndex,
    ThswIndex,
    Barometer,
    Rainfall,
    PeakRainRate,
    WindSamples,
    AverageWindSpeed,
    PeakWindSpeed,
    PrevailingWindDirection,
    PeakWindDirection,
    AverageSolarRadiation,
    PeakSolarRadiation,
    AverageUvIndex,
    PeakUvIndex,
    AccumulatedEt,
}
