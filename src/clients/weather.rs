use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, decode_entries, fetch_json, trim_base_url};
use crate::config::ProviderConfig;

const PROVIDER: &str = "weather";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    daily: Option<Daily>,
}

#[derive(Debug, Deserialize)]
struct Daily {
    #[serde(default)]
    data: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyEntry {
    /// Unix timestamp (seconds) of the start of the day.
    pub time: Option<i64>,
    pub summary: Option<String>,
}

/// Dark Sky style forecast client.
#[derive(Clone)]
pub struct WeatherClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: trim_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn daily_forecast(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<DailyEntry>, ProviderError> {
        let url = format!(
            "{}/forecast/{}/{},{}",
            self.base_url, self.api_key, latitude, longitude
        );

        let response: ForecastResponse = fetch_json(PROVIDER, self.client.get(&url)).await?;

        let entries = response.daily.map(|d| d.data).unwrap_or_default();

        Ok(decode_entries(PROVIDER, entries))
    }
}
