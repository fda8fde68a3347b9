use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, decode_entries, fetch_json, trim_base_url};
use crate::config::ProviderConfig;

const PROVIDER: &str = "eventbrite";

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(default)]
    events: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventEntry {
    pub url: Option<String>,
    pub name: Option<EventText>,
    pub start: Option<EventStart>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventText {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventStart {
    pub local: Option<String>,
}

#[derive(Clone)]
pub struct EventbriteClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl EventbriteClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: trim_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    pub async fn search_by_address(&self, address: &str) -> Result<Vec<EventEntry>, ProviderError> {
        let url = format!("{}/v3/events/search/", self.base_url);
        let request = self.client.get(&url).query(&[
            ("token", self.api_key.as_str()),
            ("location.address", address),
        ]);

        let response: EventSearchResponse = fetch_json(PROVIDER, request).await?;

        Ok(decode_entries(PROVIDER, response.events))
    }
}
