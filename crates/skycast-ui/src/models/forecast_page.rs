//! Forecast page: fetches the forecast for the selected place and renders
//! navbar + one card per day.
//!
//! The page is owned by the UI thread and driven by [`ForecastPage::poll`].
//! A place change cancels the in-flight request and starts a new one under a
//! fresh generation; completions from older generations are discarded.

use std::sync::mpsc::{Receiver, Sender};
use std::sync::Arc;

use skycast_weather::{
    daily_digest, ForecastResponse, TemperatureUnit, WeatherProvider, DIGEST_DAYS,
};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use crate::markup::escape;
use crate::models::forecast_card::{ForecastCardProps, SunTimes};
use crate::models::navbar::NavBar;
use crate::services::weather_service::{self, WeatherError, WeatherServiceMessage};
use crate::state::SelectionStore;

/// Derived, render-ready forecast
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastView {
    pub location: String,
    pub cards: Vec<ForecastCardProps>,
}

impl ForecastView {
    /// One card per digest day. Sunrise/sunset are computed once from the city.
    pub fn from_response(response: &ForecastResponse) -> Self {
        let sun = SunTimes::from_city(&response.city);
        let cards = daily_digest(&response.list)
            .into_iter()
            .map(|entry| ForecastCardProps::from_sample(entry.sample, &sun))
            .collect();

        Self {
            location: response.city.name.clone(),
            cards,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Success(ForecastView),
    Error(WeatherError),
}

pub struct ForecastPage {
    store: SelectionStore,
    place_rx: watch::Receiver<String>,
    loading_city_rx: watch::Receiver<bool>,
    provider: Arc<WeatherProvider>,
    runtime: tokio::runtime::Handle,
    tx: Sender<WeatherServiceMessage>,
    rx: Receiver<WeatherServiceMessage>,
    state: PageState,
    active_place: String,
    generation: u64,
    cancel: Option<CancellationToken>,
    temperature_unit: TemperatureUnit,
}

impl ForecastPage {
    /// Mount the page: subscribes to the store and fetches the current place.
    pub fn mount(
        store: SelectionStore,
        provider: Arc<WeatherProvider>,
        runtime: tokio::runtime::Handle,
        temperature_unit: TemperatureUnit,
    ) -> Self {
        let mut place_rx = store.subscribe_place();
        let loading_city_rx = store.subscribe_loading_city();
        let place = place_rx.borrow_and_update().clone();
        let (tx, rx) = std::sync::mpsc::channel();

        let mut page = Self {
            store,
            place_rx,
            loading_city_rx,
            provider,
            runtime,
            tx,
            rx,
            state: PageState::Loading,
            active_place: String::new(),
            generation: 0,
            cancel: None,
            temperature_unit,
        };
        page.start_fetch(place);
        page
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, PageState::Loading)
    }

    /// Place the current (or last) request was issued for
    pub fn active_place(&self) -> &str {
        &self.active_place
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Process pending store changes and fetch results.
    ///
    /// Returns true when the rendered output may have changed. A place change
    /// moves the page to `Loading` and returns immediately, so callers always
    /// observe the loading state before the new result.
    pub fn poll(&mut self) -> bool {
        if self.place_rx.has_changed().unwrap_or(false) {
            let place = self.place_rx.borrow_and_update().clone();
            if place != self.active_place {
                self.start_fetch(place);
                return true;
            }
        }

        let mut changed = false;
        if self.loading_city_rx.has_changed().unwrap_or(false) {
            self.loading_city_rx.borrow_and_update();
            changed = true;
        }

        while let Ok(msg) = self.rx.try_recv() {
            changed |= self.apply(msg);
        }
        changed
    }

    fn start_fetch(&mut self, place: String) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
            tracing::debug!(
                "Cancelled forecast request #{} for {}",
                self.generation,
                self.active_place
            );
        }

        self.generation += 1;
        self.active_place = place.clone();
        self.state = PageState::Loading;

        let token = CancellationToken::new();
        self.cancel = Some(token.clone());

        tracing::info!("Fetching forecast #{} for {}", self.generation, place);
        weather_service::request_fetch(
            &self.tx,
            &self.runtime,
            self.provider.clone(),
            place,
            self.generation,
            token,
        );
    }

    fn apply(&mut self, msg: WeatherServiceMessage) -> bool {
        match msg {
            WeatherServiceMessage::FetchDone {
                generation,
                place,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!(
                        "Discarding stale forecast #{} for {} (current #{})",
                        generation,
                        place,
                        self.generation
                    );
                    return false;
                }

                self.cancel = None;
                self.state = match result {
                    Ok(response) => {
                        let view = ForecastView::from_response(&response);
                        tracing::info!("Forecast for {} ready: {} days", place, view.cards.len());
                        PageState::Success(view)
                    }
                    Err(e) => {
                        tracing::warn!("Forecast for {} failed: {}", place, e);
                        PageState::Error(e)
                    }
                };
                true
            }
        }
    }

    /// Render the page as HTML.
    pub fn render(&self) -> String {
        match &self.state {
            PageState::Loading => centered(r#"<p class="loading">Please Wait Loading...</p>"#),
            PageState::Error(e) => centered(&format!(
                r#"<p class="error">{}</p>"#,
                escape(&e.to_string())
            )),
            PageState::Success(view) => self.render_forecast(view),
        }
    }

    fn render_forecast(&self, view: &ForecastView) -> String {
        let mut lines = vec![r#"<div class="page">"#.to_string()];
        lines.push(NavBar::new(Some(&view.location)).render());
        lines.push(r#"<main class="page__main">"#.to_string());

        if self.store.loading_city() {
            lines.push(render_skeleton());
        } else {
            lines.push(r#"<section class="forecast">"#.to_string());
            lines.push(format!(
                r#"<p class="forecast__title">Forecast ({} days)</p>"#,
                DIGEST_DAYS
            ));
            for card in &view.cards {
                lines.push(card.render(self.temperature_unit));
            }
            lines.push("</section>".to_string());
        }

        lines.push("</main>".to_string());
        lines.push("</div>".to_string());
        lines.join("\n")
    }
}

impl Drop for ForecastPage {
    fn drop(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

fn centered(content: &str) -> String {
    format!("<div class=\"page page--centered\">\n{}\n</div>", content)
}

/// Placeholder blocks shown while the search control resolves a city.
fn render_skeleton() -> String {
    let mut lines = vec![r#"<section class="skeleton" aria-busy="true">"#.to_string()];
    for _ in 0..DIGEST_DAYS {
        lines.push(r#"  <div class="skeleton__card"></div>"#.to_string());
    }
    lines.push("</section>".to_string());
    lines.join("\n")
}
