pub mod app_services;
pub mod error_mapping;
pub mod markup;
pub mod models;
pub mod services;
pub mod state;

pub use app_services::AppServices;
pub use models::{ForecastCardProps, ForecastPage, ForecastView, NavBar, PageState, SunTimes};
pub use services::{WeatherError, WeatherServiceMessage};
pub use state::{SelectionStore, StateError};
