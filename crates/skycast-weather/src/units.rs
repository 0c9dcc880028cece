//! Unit conversions used when formatting forecast values for display.

use crate::types::TemperatureUnit;

const KELVIN_OFFSET: f64 = 273.15;
const MPS_TO_KMH: f64 = 3.6;

/// Format a distance in meters as whole kilometers, e.g. `"10km"`.
///
/// Rounds half away from zero. Non-finite input formats as `"0km"`.
pub fn meters_to_kilometers(distance: f64) -> String {
    let km = (distance / 1000.0).round();
    format!("{}km", whole(km))
}

/// Convert meters per second to kilometers per hour.
///
/// Returns the bare number; callers append `" km/h"`.
pub fn convert_wind_speed(meters_per_second: f64) -> String {
    let kmh = meters_per_second * MPS_TO_KMH;
    format!("{}", kmh)
}

/// Convert a Kelvin reading to the requested unit. `Auto` means Celsius.
pub fn convert_kelvin(kelvin: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Auto | TemperatureUnit::Celsius => kelvin - KELVIN_OFFSET,
        TemperatureUnit::Fahrenheit => (kelvin - KELVIN_OFFSET) * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Kelvin => kelvin,
    }
}

/// Whole-degree temperature label, e.g. `"12°C"`.
pub fn format_temperature(kelvin: f64, unit: TemperatureUnit) -> String {
    let value = convert_kelvin(kelvin, unit).round();
    format!("{}{}", whole(value), unit.suffix())
}

// Collapses -0 and non-finite values to 0 so Display prints a plain "0".
fn whole(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        0.0
    } else {
        value
    }
}
