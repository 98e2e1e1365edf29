//! Core library for the city weather page.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather provider and its response validation
//! - The weather page: snapshot store, one-shot loader, view renderer
//! - Navigation between screens
//!
//! It is used by `cityweather-cli`, but holds no terminal code so another
//! front end can mount the same page.

pub mod config;
pub mod error;
pub mod model;
pub mod navigation;
pub mod page;
pub mod provider;
pub mod view;

pub use config::{Config, LoaderConfig};
pub use error::LoadError;
pub use model::{CityId, CityWeatherSnapshot};
pub use navigation::{ChannelNavigator, Navigator, Route};
pub use page::WeatherPage;
pub use provider::{WeatherProvider, provider_from_config};
pub use view::{CardList, CardView, PageView, ViewState};
