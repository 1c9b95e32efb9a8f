//! Conversions from Vantage console units to the units we store.
//!
//! Temperatures and speeds are rounded to one decimal place; pressures and
//! rain amounts to whole millibars and millimetres. Rounding is half away
//! from zero.

/// Millibars per inch of mercury.
const MB_PER_INHG: f64 = 33.863_886_666_7;

/// Knots per statute mile per hour.
const KNOTS_PER_MPH: f64 = 0.868_976_241_9;

/// Millimetres per inch.
const MM_PER_INCH: f64 = 25.4;

/// Round `value` to `places` decimal places, half away from zero.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let multiplier = 10f64.powi(places);
    (value * multiplier).round() / multiplier
}

/// Barometric pressure in inHg to whole millibars.
#[must_use]
pub fn pressure_inhg_to_mb(inhg: f64) -> f64 {
    (inhg * MB_PER_INHG).round()
}

/// Temperature in °F to °C, one decimal place.
#[must_use]
pub fn temperature_f_to_c(fahrenheit: f64) -> f64 {
    round_to((fahrenheit - 32.0) * 5.0 / 9.0, 1)
}

/// Speed in mph to knots, one decimal place.
#[must_use]
pub fn speed_mph_to_knots(mph: f64) -> f64 {
    round_to(mph * KNOTS_PER_MPH, 1)
}

/// Rain in rain-collector clicks (hundredths of an inch) to whole millimetres.
#[must_use]
pub fn length_hundredths_in_to_mm(hundredths: f64) -> f64 {
    (0.01 * hundredths * MM_PER_INCH).round()
}

#[must_use]
pub fn pressure_mb_to_inhg(mb: f64) -> f64 {
    mb / MB_PER_INHG
}

#[must_use]
pub fn temperature_c_to_f(celsius: f64) -> f64 {
    celsius * 9.0 / 5.0 + 32.0
}

#[must_use]
pub fn speed_knots_to_mph(knots: f64) -> f64 {
    knots / KNOTS_PER_MPH
}

#[must_use]
pub fn length_mm_to_hundredths_in(mm: f64) -> f64 {
    mm / MM_PER_INCH * 100.0
}

/// Approximate dew point from air temperature (°C) and relative humidity (%).
///
/// Uses the simple `T - (100 - RH) / 5` approximation, which holds well
/// above 50% humidity.
#[must_use]
pub fn approximate_dew_point(temperature_c: f64, humidity_pct: f64) -> f64 {
    round_to(temperature_c - (100.0 - humidity_pct) / 5.0, 1)
}
