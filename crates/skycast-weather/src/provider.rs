//! HTTP client for the 5-day/3-hour forecast endpoint.

use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;
use url::Url;

use crate::types::{ApiErrorBody, ForecastResponse, WeatherError};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
const FORECAST_PATH: &str = "/data/2.5/forecast";
/// Number of 3-hour samples requested (5 days)
pub const SAMPLE_COUNT: u32 = 40;
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: Option<String>,
}

impl WeatherProvider {
    /// Create a provider with the default request timeout.
    pub fn new(api_key: Option<String>) -> Result<Self, WeatherError> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(api_key: Option<String>, timeout: Duration) -> Result<Self, WeatherError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Point the provider at another host (mock servers, proxies).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Build the request URL for a place. The API key is part of the query.
    fn forecast_url(&self, place: &str, api_key: &str) -> Result<Url, WeatherError> {
        let endpoint = format!("{}{}", self.base_url, FORECAST_PATH);
        let count = SAMPLE_COUNT.to_string();
        Url::parse_with_params(
            &endpoint,
            &[("q", place), ("appid", api_key), ("cnt", count.as_str())],
        )
        .map_err(|e| WeatherError::Parse(format!("Invalid forecast URL {}: {}", endpoint, e)))
    }

    /// Fetch the 40-sample forecast for a place name.
    ///
    /// No retry: any failure is returned to the caller as-is.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_forecast(&self, place: &str) -> Result<ForecastResponse, WeatherError> {
        let api_key = match self.api_key.as_deref() {
            Some(k) if !k.trim().is_empty() => k,
            _ => return Err(WeatherError::MissingApiKey),
        };

        let url = self.forecast_url(place, api_key)?;
        tracing::debug!("Requesting forecast for {}", place);

        // The request URL carries the API key; keep it out of error messages.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let forecast = self.handle_response(response).await?;

        tracing::info!(
            "Fetched {} forecast samples for {}",
            forecast.list.len(),
            forecast.city.name
        );
        Ok(forecast)
    }

    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> Result<ForecastResponse, WeatherError> {
        let status = response.status();
        let body = response.text().await.map_err(reqwest::Error::without_url)?;

        if status.is_success() {
            serde_json::from_str(&body)
                .map_err(|e| WeatherError::Parse(format!("JSON parse error: {}", e)))
        } else {
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_default();
            tracing::warn!("Forecast request failed with status {}: {}", status, message);
            Err(WeatherError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}
