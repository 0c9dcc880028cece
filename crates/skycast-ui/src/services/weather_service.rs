//! Weather backend: async forecast fetching.
//! Network work runs on the tokio runtime; results are sent via mpsc.

use std::sync::Arc;

use skycast_core::{NetworkError, ReqwestErrorExt};
use skycast_weather::{ForecastResponse, WeatherProvider};
use tokio_util::sync::CancellationToken;

/// Error type for weather operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeatherError {
    Network(String),
    Timeout,
    Api { status: u16, message: String },
    Parse(String),
    MissingApiKey,
    NotInitialized,
}

impl std::fmt::Display for WeatherError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherError::Network(s) => write!(f, "{}", s),
            WeatherError::Timeout => write!(f, "Request timed out"),
            WeatherError::Api { status, message } if message.is_empty() => {
                write!(f, "Request failed with status code {}", status)
            }
            WeatherError::Api { status, message } => {
                write!(f, "Request failed with status code {}: {}", status, message)
            }
            WeatherError::Parse(s) => write!(f, "{}", s),
            WeatherError::MissingApiKey => write!(f, "Weather API key is not configured"),
            WeatherError::NotInitialized => write!(f, "Weather service not initialized"),
        }
    }
}

impl std::error::Error for WeatherError {}

impl From<skycast_weather::WeatherError> for WeatherError {
    fn from(e: skycast_weather::WeatherError) -> Self {
        use skycast_weather::WeatherError as Provider;
        match e {
            Provider::Network(err) => match err.into_network_error() {
                NetworkError::Timeout => WeatherError::Timeout,
                other => WeatherError::Network(other.to_string()),
            },
            Provider::Api { status, message } => WeatherError::Api { status, message },
            Provider::Parse(s) => WeatherError::Parse(s),
            Provider::MissingApiKey => WeatherError::MissingApiKey,
        }
    }
}

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of fetching a forecast. `generation` identifies the request.
    FetchDone {
        generation: u64,
        place: String,
        result: Result<ForecastResponse, WeatherError>,
    },
}

/// Request a forecast for `place` asynchronously.
///
/// Sends `FetchDone` on the channel when complete. If `cancel` fires first the
/// request is dropped and nothing is sent.
pub fn request_fetch(
    tx: &std::sync::mpsc::Sender<WeatherServiceMessage>,
    runtime: &tokio::runtime::Handle,
    provider: Arc<WeatherProvider>,
    place: String,
    generation: u64,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    runtime.spawn(async move {
        let result = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("Forecast request #{} for {} cancelled", generation, place);
                return;
            }
            result = provider.fetch_forecast(&place) => result,
        };

        let result = result.map_err(|e| {
            tracing::error!("Failed to fetch forecast for {}: {}", place, e);
            WeatherError::from(e)
        });

        if tx
            .send(WeatherServiceMessage::FetchDone {
                generation,
                place,
                result,
            })
            .is_err()
        {
            tracing::debug!("Forecast request #{} finished after receiver closed", generation);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_error_display() {
        assert_eq!(
            WeatherError::Api {
                status: 404,
                message: "city not found".into()
            }
            .to_string(),
            "Request failed with status code 404: city not found"
        );
        assert!(WeatherError::Timeout.to_string().contains("timed out"));
        assert!(WeatherError::NotInitialized.to_string().contains("not initialized"));
    }

    #[test]
    fn provider_errors_convert() {
        let err: WeatherError = skycast_weather::WeatherError::MissingApiKey.into();
        assert_eq!(err, WeatherError::MissingApiKey);

        let err: WeatherError = skycast_weather::WeatherError::Api {
            status: 500,
            message: String::new(),
        }
        .into();
        assert_eq!(err.to_string(), "Request failed with status code 500");
    }

    #[test]
    fn missing_key_reports_through_channel() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        let provider = Arc::new(WeatherProvider::new(None).unwrap());

        request_fetch(
            &tx,
            runtime.handle(),
            provider,
            "Paris".to_string(),
            7,
            CancellationToken::new(),
        );

        let msg = rx.recv_timeout(std::time::Duration::from_secs(5)).unwrap();
        match msg {
            WeatherServiceMessage::FetchDone {
                generation,
                place,
                result,
            } => {
                assert_eq!(generation, 7);
                assert_eq!(place, "Paris");
                assert_eq!(result.unwrap_err(), WeatherError::MissingApiKey);
            }
        }
    }

    #[test]
    fn cancelled_request_sends_nothing() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let (tx, rx) = std::sync::mpsc::channel();
        // Unroutable address: the request would hang until the timeout.
        let provider = Arc::new(
            WeatherProvider::new(Some("key".into()))
                .unwrap()
                .with_base_url("http://10.255.255.1"),
        );
        let cancel = CancellationToken::new();
        cancel.cancel();

        request_fetch(&tx, runtime.handle(), provider, "Paris".to_string(), 1, cancel);

        assert!(rx
            .recv_timeout(std::time::Duration::from_millis(300))
            .is_err());
    }
}
