pub mod forecast_card;
pub mod forecast_page;
pub mod navbar;

pub use forecast_card::{ForecastCardProps, SunTimes};
pub use forecast_page::{ForecastPage, ForecastView, PageState};
pub use navbar::NavBar;
