//! Navigation bar showing the forecast's location name.
//!
//! The place-search control lives outside this view and writes to the
//! selection store directly.

use crate::markup::escape;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavBar {
    location: String,
}

impl NavBar {
    pub fn new(location: Option<&str>) -> Self {
        Self {
            location: location.unwrap_or_default().to_string(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn render(&self) -> String {
        [
            r#"<nav class="navbar">"#.to_string(),
            r#"  <h2 class="navbar__title">Weather</h2>"#.to_string(),
            format!(
                r#"  <p class="navbar__location">{}</p>"#,
                escape(&self.location)
            ),
            "</nav>".to_string(),
        ]
        .join("\n")
    }
}
