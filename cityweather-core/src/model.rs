use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// OpenWeather numeric city identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CityId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(CityId)
            .map_err(|_| anyhow::anyhow!("Invalid city id '{s}': expected a positive integer"))
    }
}

/// Joins ids the way the group endpoint expects them: `1,2,3`.
pub fn join_ids(ids: &[CityId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(",")
}

/// Current weather for one city, as held by the weather page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityWeatherSnapshot {
    pub id: u64,
    pub city_name: String,
    pub country_code: String,
    pub primary_condition: String,
    pub temperature_c: f64,
}
