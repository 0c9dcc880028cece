//! Forecast card: one day's summary, fully resolved for display.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use skycast_weather::{
    convert_wind_speed, format_temperature, meters_to_kilometers, City, ForecastSample,
    TemperatureUnit,
};

use crate::markup::escape;

const ICON_BASE_URL: &str = "https://openweathermap.org/img/wn";

/// Sunrise/sunset labels ("H:mm"), computed once per page from the city.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SunTimes {
    pub sunrise: String,
    pub sunset: String,
}

impl SunTimes {
    /// Uses the city's UTC offset when known, UTC otherwise. A missing
    /// timestamp is treated as epoch 0.
    pub fn from_city(city: &City) -> Self {
        let offset = city
            .timezone
            .and_then(FixedOffset::east_opt)
            .unwrap_or_else(|| Utc.fix());

        Self {
            sunrise: clock_label(city.sunrise.unwrap_or(0), &offset),
            sunset: clock_label(city.sunset.unwrap_or(0), &offset),
        }
    }
}

fn clock_label(epoch: i64, offset: &FixedOffset) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|dt| dt.with_timezone(offset).format("%-H:%M").to_string())
        .unwrap_or_default()
}

/// View model for a single forecast card.
///
/// Text fields fall back to an empty string and numbers to 0 when the
/// upstream value is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCardProps {
    pub description: String,
    pub weather_icon: String,
    /// "dd.mm"
    pub date: String,
    /// Full weekday name
    pub day: String,
    pub feels_like: f64,
    pub temp: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// "<N> hPa"
    pub air_pressure: String,
    /// "<N>%"
    pub humidity: String,
    pub sunrise: String,
    pub sunset: String,
    /// "<N>km"
    pub visibility: String,
    /// "<N> km/h"
    pub wind_speed: String,
}

impl ForecastCardProps {
    pub fn from_sample(sample: &ForecastSample, sun: &SunTimes) -> Self {
        let condition = sample.primary_condition();
        let when = sample.display_datetime();
        let main = &sample.main;

        Self {
            description: condition.map(|c| c.description.clone()).unwrap_or_default(),
            weather_icon: condition.map(|c| c.icon.clone()).unwrap_or_default(),
            date: when
                .map(|dt| dt.format("%d.%m").to_string())
                .unwrap_or_default(),
            day: when.map(|dt| dt.format("%A").to_string()).unwrap_or_default(),
            feels_like: main.feels_like.unwrap_or(0.0),
            temp: main.temp.unwrap_or(0.0),
            temp_min: main.temp_min.unwrap_or(0.0),
            temp_max: main.temp_max.unwrap_or(0.0),
            air_pressure: format!("{} hPa", main.pressure.unwrap_or(0.0)),
            humidity: format!("{}%", main.humidity.unwrap_or(0.0)),
            sunrise: sun.sunrise.clone(),
            sunset: sun.sunset.clone(),
            visibility: meters_to_kilometers(sample.visibility_meters().unwrap_or(0.0)),
            wind_speed: format!("{} km/h", convert_wind_speed(sample.wind.speed.unwrap_or(0.0))),
        }
    }

    pub fn icon_url(&self) -> Option<String> {
        if self.weather_icon.is_empty() {
            None
        } else {
            Some(format!("{}/{}@4x.png", ICON_BASE_URL, self.weather_icon))
        }
    }

    /// Render the card as HTML. Temperatures are Kelvin upstream and are
    /// converted to `unit` here.
    pub fn render(&self, unit: TemperatureUnit) -> String {
        let mut lines = vec![r#"<article class="forecast-card">"#.to_string()];
        lines.push(r#"  <div class="forecast-card__summary">"#.to_string());

        if let Some(src) = self.icon_url() {
            lines.push(format!(
                r#"    <img class="weather-icon" src="{}" alt="{}">"#,
                escape(&src),
                escape(&self.description)
            ));
        }
        lines.push(format!(r#"    <p class="date">{}</p>"#, escape(&self.date)));
        lines.push(format!(r#"    <p class="day">{}</p>"#, escape(&self.day)));
        lines.push(format!(
            r#"    <p class="temp">{}</p>"#,
            format_temperature(self.temp, unit)
        ));
        lines.push(format!(
            r#"    <p class="feels-like">Feels like {}</p>"#,
            format_temperature(self.feels_like, unit)
        ));
        lines.push(format!(
            r#"    <p class="temp-range">{}&#8595; {}&#8593;</p>"#,
            format_temperature(self.temp_min, unit),
            format_temperature(self.temp_max, unit)
        ));
        lines.push(format!(
            r#"    <p class="description">{}</p>"#,
            escape(&self.description)
        ));
        lines.push("  </div>".to_string());

        lines.push(r#"  <dl class="forecast-card__details">"#.to_string());
        for (label, value) in [
            ("Visibility", &self.visibility),
            ("Humidity", &self.humidity),
            ("Wind speed", &self.wind_speed),
            ("Air pressure", &self.air_pressure),
            ("Sunrise", &self.sunrise),
            ("Sunset", &self.sunset),
        ] {
            lines.push(format!(
                "    <div><dt>{}</dt><dd>{}</dd></div>",
                label,
                escape(value)
            ));
        }
        lines.push("  </dl>".to_string());
        lines.push("</article>".to_string());

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skycast_weather::{Condition, MainReadings, Wind};

    // 2024-03-01T09:00:00Z, a Friday
    const DT: i64 = 1_709_283_600;

    fn full_sample() -> ForecastSample {
        ForecastSample {
            dt: DT,
            dt_txt: Some("2024-03-01 09:00:00".to_string()),
            main: MainReadings {
                temp: Some(284.2),
                feels_like: Some(283.1),
                temp_min: Some(282.0),
                temp_max: Some(285.5),
                pressure: Some(1013.0),
                humidity: Some(76.0),
                visibility: None,
            },
            weather: vec![Condition {
                id: Some(500),
                description: "light rain".to_string(),
                icon: "10d".to_string(),
            }],
            wind: Wind { speed: Some(5.0) },
            visibility: Some(10000.0),
        }
    }

    #[test]
    fn sun_times_use_city_offset() {
        let city = City {
            name: "Paris".into(),
            // 2024-03-01 06:05:00Z and 17:30:00Z
            sunrise: Some(1_709_273_100),
            sunset: Some(1_709_314_200),
            timezone: Some(3600),
        };
        let sun = SunTimes::from_city(&city);
        assert_eq!(sun.sunrise, "7:05");
        assert_eq!(sun.sunset, "18:30");
    }

    #[test]
    fn sun_times_default_to_utc_epoch() {
        let sun = SunTimes::from_city(&City::default());
        assert_eq!(sun.sunrise, "0:00");
        assert_eq!(sun.sunset, "0:00");
    }

    #[test]
    fn props_from_full_sample() {
        let sun = SunTimes {
            sunrise: "7:05".into(),
            sunset: "18:30".into(),
        };
        let props = ForecastCardProps::from_sample(&full_sample(), &sun);

        assert_eq!(props.description, "light rain");
        assert_eq!(props.weather_icon, "10d");
        assert_eq!(props.date, "01.03");
        assert_eq!(props.day, "Friday");
        assert_eq!(props.temp, 284.2);
        assert_eq!(props.air_pressure, "1013 hPa");
        assert_eq!(props.humidity, "76%");
        assert_eq!(props.visibility, "10km");
        assert_eq!(props.wind_speed, "18 km/h");
        assert_eq!(props.sunrise, "7:05");
        assert_eq!(props.sunset, "18:30");
    }

    #[test]
    fn props_fall_back_for_missing_fields() {
        let sample = ForecastSample {
            dt: DT,
            dt_txt: None,
            main: MainReadings::default(),
            weather: Vec::new(),
            wind: Wind::default(),
            visibility: None,
        };
        let props = ForecastCardProps::from_sample(&sample, &SunTimes::default());

        assert_eq!(props.description, "");
        assert_eq!(props.weather_icon, "");
        assert_eq!(props.temp, 0.0);
        assert_eq!(props.feels_like, 0.0);
        assert_eq!(props.air_pressure, "0 hPa");
        assert_eq!(props.humidity, "0%");
        assert_eq!(props.visibility, "0km");
        assert_eq!(props.wind_speed, "0 km/h");
        // Labels come from `dt` when `dt_txt` is absent.
        assert_eq!(props.date, "01.03");
        assert_eq!(props.day, "Friday");
        assert!(props.icon_url().is_none());
    }

    #[test]
    fn empty_description_renders_empty() {
        let mut sample = full_sample();
        sample.weather[0].description = String::new();
        let props = ForecastCardProps::from_sample(&sample, &SunTimes::default());
        assert_eq!(props.description, "");

        let html = props.render(TemperatureUnit::Celsius);
        assert!(html.contains(r#"<p class="description"></p>"#));
    }

    #[test]
    fn render_contains_formatted_values() {
        let props = ForecastCardProps::from_sample(&full_sample(), &SunTimes::default());
        let html = props.render(TemperatureUnit::Celsius);

        assert!(html.contains("https://openweathermap.org/img/wn/10d@4x.png"));
        assert!(html.contains(r#"<p class="temp">11°C</p>"#));
        assert!(html.contains("<dt>Visibility</dt><dd>10km</dd>"));
        assert!(html.contains("<dt>Wind speed</dt><dd>18 km/h</dd>"));
        assert!(html.contains("<dt>Air pressure</dt><dd>1013 hPa</dd>"));
    }

    #[test]
    fn render_escapes_text() {
        let mut sample = full_sample();
        sample.weather[0].description = "<script>".to_string();
        let props = ForecastCardProps::from_sample(&sample, &SunTimes::default());
        let html = props.render(TemperatureUnit::Auto);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
