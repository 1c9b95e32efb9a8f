pub mod live_weather;
pub mod weather_archive;
