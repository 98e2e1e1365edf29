use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::model::CityId;

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5";

/// Cities shown on the weather page when the config file does not name any.
pub const DEFAULT_CITY_IDS: [CityId; 3] = [CityId(3451190), CityId(5128581), CityId(1850147)];

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// endpoint = "https://api.openweathermap.org/data/2.5"
/// city_ids = [3451190, 5128581, 1850147]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_key: Option<String>,

    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_city_ids")]
    pub city_ids: Vec<CityId>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: default_endpoint(),
            city_ids: default_city_ids(),
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_city_ids() -> Vec<CityId> {
    DEFAULT_CITY_IDS.to_vec()
}

/// Everything the loader needs to issue its one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    pub endpoint: String,
    pub api_key: String,
    pub city_ids: Vec<CityId>,
}

impl LoaderConfig {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>, city_ids: Vec<CityId>) -> Self {
        Self {
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            city_ids,
        }
    }
}

impl Config {
    /// Build the loader configuration, failing when no API key is known.
    pub fn loader_config(&self) -> Result<LoaderConfig> {
        let api_key = self.api_key.as_deref().filter(|k| !k.trim().is_empty()).ok_or_else(|| {
            anyhow!(
                "No OpenWeather API key configured.\n\
                 Hint: run `cityweather configure` or pass `--api-key <KEY>`."
            )
        })?;

        if self.city_ids.is_empty() {
            return Err(anyhow!(
                "No city ids configured.\n\
                 Hint: run `cityweather configure` and enter at least one city id."
            ));
        }

        Ok(LoaderConfig::new(self.endpoint.clone(), api_key, self.city_ids.clone()))
    }

    /// Replace the stored API key, ignoring blank input.
    pub fn set_api_key(&mut self, api_key: String) {
        let trimmed = api_key.trim();
        if !trimmed.is_empty() {
            self.api_key = Some(trimmed.to_string());
        }
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        tracing::debug!(path = %path.display(), "loaded config");
        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "cityweather", "cityweather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
