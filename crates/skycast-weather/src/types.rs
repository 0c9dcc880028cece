use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Format the forecast API uses for `dt_txt`.
pub const DT_TXT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Temperature unit preference for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Auto,
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl TemperatureUnit {
    /// Display suffix. `Auto` renders as Celsius.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Auto | Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

/// Temperature and atmosphere readings of one sample.
///
/// Every field is optional: a missing reading degrades to `0` at the view layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainReadings {
    #[serde(default)]
    pub temp: Option<f64>,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub temp_min: Option<f64>,
    #[serde(default)]
    pub temp_max: Option<f64>,
    #[serde(default)]
    pub pressure: Option<f64>,
    #[serde(default)]
    pub humidity: Option<f64>,
    #[serde(default)]
    pub visibility: Option<f64>,
}

/// Weather condition descriptor (`weather[]` entry)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wind {
    /// Meters per second
    #[serde(default)]
    pub speed: Option<f64>,
}

/// One 3-hour forecast reading, as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: Option<String>,
    #[serde(default)]
    pub main: MainReadings,
    #[serde(default)]
    pub weather: Vec<Condition>,
    #[serde(default)]
    pub wind: Wind,
    /// Sample-level visibility in meters. The live API reports it here
    /// rather than under `main`.
    #[serde(default)]
    pub visibility: Option<f64>,
}

impl ForecastSample {
    /// Absolute timestamp of the reading, `None` if `dt` is out of range.
    pub fn utc_datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
    }

    /// Calendar date (UTC) used for daily bucketing.
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.utc_datetime().map(|dt| dt.date_naive())
    }

    /// Wall-clock time used for labels: `dt_txt` when it parses, else `dt` in UTC.
    pub fn display_datetime(&self) -> Option<NaiveDateTime> {
        self.dt_txt
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, DT_TXT_FORMAT).ok())
            .or_else(|| self.utc_datetime().map(|dt| dt.naive_utc()))
    }

    pub fn primary_condition(&self) -> Option<&Condition> {
        self.weather.first()
    }

    /// Visibility in meters; `main.visibility` wins over the sample-level field.
    pub fn visibility_meters(&self) -> Option<f64> {
        self.main.visibility.or(self.visibility)
    }
}

/// City descriptor attached to a forecast
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct City {
    #[serde(default)]
    pub name: String,
    /// Epoch seconds
    #[serde(default)]
    pub sunrise: Option<i64>,
    /// Epoch seconds
    #[serde(default)]
    pub sunset: Option<i64>,
    /// Shift in seconds from UTC
    #[serde(default)]
    pub timezone: Option<i32>,
}

/// Complete forecast response: chronological samples plus the city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastSample>,
    #[serde(default)]
    pub city: City,
}

/// Error body the API sends with non-2xx responses
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Request failed with status code {status}{}", message_suffix(.message))]
    Api { status: u16, message: String },
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Weather API key is not configured")]
    MissingApiKey,
}

fn message_suffix(message: &str) -> String {
    if message.is_empty() {
        String::new()
    } else {
        format!(": {}", message)
    }
}
