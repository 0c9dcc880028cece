use crate::services::weather_service::WeatherError as UiWeatherError;
use skycast_core::{AppError, ConfigError, NetworkError, WeatherError};

impl From<UiWeatherError> for AppError {
    fn from(e: UiWeatherError) -> Self {
        match e {
            UiWeatherError::Network(s) => AppError::Network(NetworkError::ConnectionFailed(s)),
            UiWeatherError::Timeout => AppError::Network(NetworkError::Timeout),
            UiWeatherError::Api { status: 401, .. } => {
                AppError::Weather(WeatherError::InvalidApiKey)
            }
            UiWeatherError::Api {
                status: 404,
                message,
            } => AppError::Weather(WeatherError::LocationNotFound(message)),
            UiWeatherError::Api { status, message } if status >= 500 => {
                AppError::Network(NetworkError::ServerError { status, message })
            }
            UiWeatherError::Api { status, message } => {
                AppError::Weather(WeatherError::ApiError(format!("{}: {}", status, message)))
            }
            UiWeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
            UiWeatherError::MissingApiKey => {
                AppError::Config(ConfigError::MissingSetting("weather.api_key".to_string()))
            }
            UiWeatherError::NotInitialized => AppError::Weather(WeatherError::ServiceUnavailable),
        }
    }
}
