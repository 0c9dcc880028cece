//! Error taxonomy shared by the SkyCast crates.
//!
//! Forecast failures from the UI layer are mapped into [`AppError`], which
//! knows how to phrase each failure for the person looking at the page.

use thiserror::Error;

/// Top-level error; `user_message()` gives the text to show or log for users.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Forecast error: {0}")]
    Weather(#[from] WeatherError),
}

impl AppError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Weather(e) => e.user_message(),
        }
    }
}

/// Transport-level failures talking to the forecast host.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Could not reach the forecast service. Check your connection."
            }
            NetworkError::Timeout => "The forecast service took too long to answer.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The forecast service is having trouble. Try again later."
            }
            NetworkError::ServerError { .. } => "The forecast request was rejected.",
            NetworkError::InvalidResponse(_) => {
                "The forecast service sent data SkyCast can't read."
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    /// `0` is the dotted config key, e.g. `weather.api_key`.
    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::MissingSetting(key) if key == "weather.api_key" => {
                "No forecast API key configured. Set SKYCAST_WEATHER_KEY or weather.api_key."
            }
            ConfigError::MissingSetting(_) => "A required setting is missing from config.toml.",
        }
    }
}

/// Failures the forecast API reports about the request itself.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("Place not found: {0}")]
    LocationNotFound(String),

    #[error("Forecast API error: {0}")]
    ApiError(String),

    #[error("Invalid API key")]
    InvalidApiKey,

    #[error("Forecast service unavailable")]
    ServiceUnavailable,
}

impl WeatherError {
    pub fn user_message(&self) -> &'static str {
        match self {
            WeatherError::LocationNotFound(_) => "No forecast for that place. Check the spelling.",
            WeatherError::ApiError(_) => "The forecast request failed.",
            WeatherError::InvalidApiKey => "The forecast API key was rejected.",
            WeatherError::ServiceUnavailable => "The forecast service is not running.",
        }
    }
}

/// Classify a reqwest failure by what went wrong on the wire.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_api_key_names_the_env_var() {
        let err = AppError::from(ConfigError::MissingSetting("weather.api_key".into()));
        assert!(err.user_message().contains("SKYCAST_WEATHER_KEY"));
    }

    #[test]
    fn other_missing_setting_is_generic() {
        let err = ConfigError::MissingSetting("ui.poll_interval_ms".into());
        assert!(err.user_message().contains("config.toml"));
    }

    #[test]
    fn not_found_message() {
        let err = AppError::Weather(WeatherError::LocationNotFound("Atlantis".into()));
        assert_eq!(err.to_string(), "Forecast error: Place not found: Atlantis");
        assert_eq!(err.user_message(), "No forecast for that place. Check the spelling.");
    }

    #[test]
    fn server_error_messages_by_status() {
        let server = NetworkError::ServerError {
            status: 503,
            message: "down".into(),
        };
        let client = NetworkError::ServerError {
            status: 429,
            message: "slow down".into(),
        };
        assert!(server.user_message().contains("trouble"));
        assert!(client.user_message().contains("rejected"));
    }

    #[tokio::test]
    async fn connect_failure_is_connection_failed() {
        let err = reqwest::get("http://127.0.0.1:1").await.unwrap_err();
        assert!(matches!(err.into_network_error(), NetworkError::ConnectionFailed(_)));
    }
}
