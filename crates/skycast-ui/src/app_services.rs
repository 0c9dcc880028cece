//! Centralized application services.
//!
//! `AppServices` owns the tokio runtime and the shared services the pages
//! need. It is created once at startup and passed explicitly to whoever needs
//! it. The weather provider sits behind a RwLock so it can be replaced (new
//! API key, new host) or cleared on shutdown, after which no new page can be
//! mounted.

use std::sync::Arc;

use anyhow::Context;
use parking_lot::RwLock;

use skycast_core::Config;
use skycast_weather::{TemperatureUnit, WeatherProvider};

use crate::models::forecast_page::ForecastPage;
use crate::services::WeatherError;
use crate::state::SelectionStore;

/// Message types for the weather service channel
pub use crate::services::WeatherServiceMessage;

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: tokio::runtime::Runtime,

    /// Weather provider
    weather_provider: RwLock<Option<Arc<WeatherProvider>>>,

    /// Selected place and search-in-progress flag
    selection: SelectionStore,

    temperature_unit: TemperatureUnit,
}

impl AppServices {
    /// Build the runtime and services from configuration.
    ///
    /// A missing API key is not fatal: the provider is still created and
    /// fetches fail with a visible error.
    pub fn new(config: &Config) -> anyhow::Result<Arc<Self>> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("skycast-tokio")
            .build()
            .context("Failed to create tokio runtime")?;

        let services = Arc::new(Self {
            runtime,
            weather_provider: RwLock::new(None),
            selection: SelectionStore::new(&config.weather.default_place),
            temperature_unit: config.weather.temperature_unit,
        });

        services.init_weather_services(config)?;
        Ok(services)
    }

    /// Get the tokio runtime handle.
    pub fn runtime(&self) -> tokio::runtime::Handle {
        self.runtime.handle().clone()
    }

    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    pub fn temperature_unit(&self) -> TemperatureUnit {
        self.temperature_unit
    }

    /// Get the weather provider if initialized.
    pub fn weather_provider(&self) -> Option<Arc<WeatherProvider>> {
        self.weather_provider.read().clone()
    }

    /// Set or update the weather provider.
    pub fn set_weather_provider(&self, provider: Option<Arc<WeatherProvider>>) {
        *self.weather_provider.write() = provider;
    }

    /// Create the weather provider from configuration.
    fn init_weather_services(&self, config: &Config) -> anyhow::Result<()> {
        let weather = &config.weather;
        let api_key = if weather.has_api_key() {
            weather.api_key.clone()
        } else {
            tracing::warn!("No weather API key configured; forecasts will fail until one is set");
            None
        };

        let provider = WeatherProvider::with_timeout(
            api_key,
            std::time::Duration::from_secs(weather.request_timeout_secs),
        )
        .context("Failed to create weather provider")?
        .with_base_url(&weather.base_url);

        tracing::info!("Weather provider initialized ({})", provider.base_url());
        self.set_weather_provider(Some(Arc::new(provider)));
        Ok(())
    }

    /// Mount a forecast page bound to the shared selection.
    pub fn forecast_page(&self) -> Result<ForecastPage, WeatherError> {
        let provider = self.weather_provider().ok_or(WeatherError::NotInitialized)?;
        Ok(ForecastPage::mount(
            self.selection.clone(),
            provider,
            self.runtime(),
            self.temperature_unit,
        ))
    }

    /// Release the weather provider. Pages already mounted keep their own
    /// handle; new mounts fail with `NotInitialized`.
    pub fn shutdown(&self) {
        tracing::info!("AppServices shutdown initiated");

        *self.weather_provider.write() = None;

        tracing::info!("AppServices shutdown complete");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        let mut config = Config::default();
        config.weather.default_place = "Paris".to_string();
        config.weather.base_url = "http://127.0.0.1:1/".to_string();
        config.weather.temperature_unit = TemperatureUnit::Fahrenheit;
        config
    }

    #[test]
    fn new_initializes_services() {
        let svc = AppServices::new(&config()).unwrap();

        assert_eq!(svc.selection().place(), "Paris");
        assert_eq!(svc.temperature_unit(), TemperatureUnit::Fahrenheit);
        let provider = svc.weather_provider().unwrap();
        assert_eq!(provider.base_url(), "http://127.0.0.1:1");
        assert!(!provider.has_api_key());
    }

    #[test]
    fn placeholder_key_is_not_used() {
        let mut config = config();
        config.weather.api_key = Some("YOUR_API_KEY".to_string());
        let svc = AppServices::new(&config).unwrap();
        assert!(!svc.weather_provider().unwrap().has_api_key());
    }

    #[test]
    fn forecast_page_requires_provider() {
        let svc = AppServices::new(&config()).unwrap();
        svc.set_weather_provider(None);
        assert!(matches!(svc.forecast_page(), Err(WeatherError::NotInitialized)));
    }

    #[test]
    fn forecast_page_mounts_loading() {
        let svc = AppServices::new(&config()).unwrap();
        let page = svc.forecast_page().unwrap();
        assert!(page.is_loading());
        assert_eq!(page.active_place(), "Paris");
    }

    #[test]
    fn shutdown_blocks_new_pages() {
        let svc = AppServices::new(&config()).unwrap();

        svc.shutdown();

        assert!(svc.weather_provider().is_none());
        assert!(matches!(svc.forecast_page(), Err(WeatherError::NotInitialized)));
    }
}
