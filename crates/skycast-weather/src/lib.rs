//! Weather data for SkyCast
//!
//! Forecast wire types, unit converters, the daily digest and the HTTP
//! provider for the 5-day/3-hour forecast API.

pub mod digest;
pub mod provider;
pub mod types;
pub mod units;

pub use digest::{daily_digest, DigestEntry, DIGEST_DAYS};
pub use provider::WeatherProvider;
pub use types::*;
pub use units::{convert_kelvin, convert_wind_speed, format_temperature, meters_to_kilometers};
