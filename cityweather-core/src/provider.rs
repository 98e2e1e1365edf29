use crate::{
    config::LoaderConfig,
    error::LoadError,
    model::{CityId, CityWeatherSnapshot},
    provider::openweather::OpenWeatherProvider,
};
use async_trait::async_trait;
use std::{fmt::Debug, sync::Arc};

pub mod openweather;

/// Source of current-weather data for the weather page and the search screen.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Current weather for every id, in the order the API returns them.
    async fn fetch_group(&self, ids: &[CityId]) -> Result<Vec<CityWeatherSnapshot>, LoadError>;

    /// Current weather for a single city looked up by name.
    async fn fetch_city(&self, query: &str) -> Result<CityWeatherSnapshot, LoadError>;
}

/// Construct the OpenWeather provider from the loader configuration.
pub fn provider_from_config(config: &LoaderConfig) -> Arc<dyn WeatherProvider> {
    Arc::new(OpenWeatherProvider::new(
        config.endpoint.clone(),
        config.api_key.clone(),
    ))
}
