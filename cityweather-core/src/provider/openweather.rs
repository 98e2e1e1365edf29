use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    error::LoadError,
    model::{CityId, CityWeatherSnapshot, join_ids},
};

use super::WeatherProvider;

/// Temperatures in the snapshot are Celsius, so the request is always metric.
pub const UNITS: &str = "metric";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: String,
    api_key: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            endpoint,
            api_key,
            http: Client::new(),
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.endpoint.trim_end_matches('/'))
    }

    async fn get(&self, resource: &str, params: &[(&str, &str)]) -> Result<String, LoadError> {
        let res = self
            .http
            .get(self.url(resource))
            .query(params)
            .query(&[("appid", self.api_key.as_str()), ("units", UNITS)])
            .send()
            .await?;

        let status = res.status();
        let body = res.text().await?;

        tracing::debug!(%status, resource, body = %truncate_body(&body), "OpenWeather response");

        if !status.is_success() {
            return Err(LoadError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        Ok(body)
    }
}

#[derive(Debug, Deserialize)]
struct OwSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct OwCityEntry {
    id: u64,
    name: String,
    sys: OwSys,
    weather: Vec<OwCondition>,
    main: OwMain,
}

#[derive(Debug, Deserialize)]
struct OwGroupResponse {
    list: Vec<OwCityEntry>,
}

impl TryFrom<OwCityEntry> for CityWeatherSnapshot {
    type Error = LoadError;

    fn try_from(entry: OwCityEntry) -> Result<Self, Self::Error> {
        let primary_condition = entry
            .weather
            .into_iter()
            .next()
            .map(|w| w.main)
            .ok_or_else(|| {
                LoadError::malformed(format!("city {} has an empty weather list", entry.id))
            })?;

        Ok(CityWeatherSnapshot {
            id: entry.id,
            city_name: entry.name,
            country_code: entry.sys.country,
            primary_condition,
            temperature_c: entry.main.temp,
        })
    }
}

/// Parse a `/group` body. One bad entry rejects the whole response.
pub fn parse_group(body: &str) -> Result<Vec<CityWeatherSnapshot>, LoadError> {
    let parsed: OwGroupResponse = serde_json::from_str(body)
        .map_err(|e| LoadError::malformed(format!("group response: {e}")))?;

    parsed.list.into_iter().map(CityWeatherSnapshot::try_from).collect()
}

/// Parse a `/weather` body for a single city.
pub fn parse_current(body: &str) -> Result<CityWeatherSnapshot, LoadError> {
    let parsed: OwCityEntry = serde_json::from_str(body)
        .map_err(|e| LoadError::malformed(format!("current weather response: {e}")))?;

    CityWeatherSnapshot::try_from(parsed)
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch_group(&self, ids: &[CityId]) -> Result<Vec<CityWeatherSnapshot>, LoadError> {
        let ids = join_ids(ids);
        let body = self.get("group", &[("id", ids.as_str())]).await?;
        parse_group(&body)
    }

    async fn fetch_city(&self, query: &str) -> Result<CityWeatherSnapshot, LoadError> {
        let body = self.get("weather", &[("q", query)]).await?;
        parse_current(&body)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn lisbon() -> serde_json::Value {
        json!({
            "id": 1,
            "name": "Lisbon",
            "sys": { "country": "PT" },
            "weather": [ { "main": "Clear" } ],
            "main": { "temp": 21.5 }
        })
    }

    #[test]
    fn parse_group_keeps_response_order() {
        let body = json!({
            "cnt": 2,
            "list": [
                lisbon(),
                {
                    "id": 5128581,
                    "name": "New York",
                    "sys": { "country": "US" },
                    "weather": [ { "main": "Rain" }, { "main": "Mist" } ],
                    "main": { "temp": 8.0, "humidity": 90 }
                }
            ]
        })
        .to_string();

        let snapshots = parse_group(&body).unwrap();

        assert_eq!(snapshots.len(), 2);
        assert_eq!(
            snapshots[0],
            CityWeatherSnapshot {
                id: 1,
                city_name: "Lisbon".into(),
                country_code: "PT".into(),
                primary_condition: "Clear".into(),
                temperature_c: 21.5,
            }
        );
        assert_eq!(snapshots[1].city_name, "New York");
        assert_eq!(snapshots[1].primary_condition, "Rain");
    }

    #[test]
    fn parse_group_accepts_empty_list() {
        assert!(parse_group(r#"{"list": []}"#).unwrap().is_empty());
    }

    #[test]
    fn parse_group_rejects_missing_list() {
        let err = parse_group(r#"{"cod": 401, "message": "Invalid API key"}"#).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn parse_group_rejects_empty_weather_list() {
        let body = json!({
            "list": [
                lisbon(),
                { "id": 2, "name": "Tokyo", "sys": { "country": "JP" }, "weather": [], "main": { "temp": 12.0 } }
            ]
        })
        .to_string();

        let err = parse_group(&body).unwrap_err();
        assert!(err.is_malformed());
        assert!(err.to_string().contains("city 2"));
    }

    #[test]
    fn parse_current_rejects_non_json() {
        assert!(parse_current("<html>bad gateway</html>").unwrap_err().is_malformed());
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let truncated = truncate_body(&long);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncated.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }

    #[tokio::test]
    async fn fetch_group_sends_ids_key_and_units() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/group"))
            .and(query_param("id", "3451190,5128581,1850147"))
            .and(query_param("appid", "test_key"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "list": [lisbon()] })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new(mock_server.uri(), "test_key".into());
        let ids = [CityId(3451190), CityId(5128581), CityId(1850147)];
        let snapshots = provider.fetch_group(&ids).await.unwrap();

        assert_eq!(snapshots.len(), 1);
        assert_eq!(snapshots[0].country_code, "PT");
    }

    #[tokio::test]
    async fn fetch_group_reports_status() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/group"))
            .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"cod":401}"#))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new(mock_server.uri(), "bad".into());
        let err = provider.fetch_group(&[CityId(1)]).await.unwrap_err();

        match err {
            LoadError::Status { status, body } => {
                assert_eq!(status.as_u16(), 401);
                assert!(body.contains("401"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn fetch_city_queries_by_name() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather"))
            .and(query_param("q", "Lisbon"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(lisbon()))
            .mount(&mock_server)
            .await;

        let provider = OpenWeatherProvider::new(format!("{}/", mock_server.uri()), "k".into());
        let snapshot = provider.fetch_city("Lisbon").await.unwrap();

        assert_eq!(snapshot.city_name, "Lisbon");
        assert_eq!(snapshot.temperature_c, 21.5);
    }
}
