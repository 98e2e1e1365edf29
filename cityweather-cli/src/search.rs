//! The Search screen: look up one city by name and show its card.

use anyhow::{Context, Result};
use cityweather_core::{CityWeatherSnapshot, WeatherProvider, view::CardView};

use crate::render;

pub async fn lookup(provider: &dyn WeatherProvider, city: &str) -> Result<CityWeatherSnapshot> {
    let city = city.trim();
    if city.is_empty() {
        anyhow::bail!("Enter a city name to search for");
    }

    provider
        .fetch_city(city)
        .await
        .with_context(|| format!("Could not load weather for '{city}'"))
}

/// Run the search and render its outcome; lookup failures become text.
pub async fn show(provider: &dyn WeatherProvider, city: &str) -> String {
    match lookup(provider, city).await {
        Ok(snapshot) => render::card(&CardView::from(&snapshot)),
        Err(e) => {
            tracing::warn!(error = %e, "search failed");
            format!("{e:#}")
        }
    }
}

pub async fn prompt(provider: &dyn WeatherProvider) -> Result<()> {
    let city = inquire::Text::new("City:")
        .with_help_message("e.g. Lisbon or Lisbon,PT")
        .prompt()?;

    println!("{}", show(provider, &city).await);
    Ok(())
}
