use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, fetch_json, trim_base_url};
use crate::config::ProviderConfig;

const PROVIDER: &str = "geocode";

#[derive(Debug, Deserialize)]
struct GeocodeResponse {
    #[serde(default)]
    results: Vec<GeocodeResult>,
    status: Option<String>,
    error_message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Geometry {
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl GeocodeResult {
    #[must_use]
    pub fn coordinates(&self) -> Option<LatLng> {
        self.geometry.as_ref().and_then(|g| g.location)
    }
}

/// Google-style geocoding API client.
#[derive(Clone)]
pub struct GeocodeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl GeocodeClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: trim_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    /// Geocodes a free-text address. An address with no match yields an
    /// empty list, not an error.
    pub async fn geocode(&self, address: &str) -> Result<Vec<GeocodeResult>, ProviderError> {
        let url = format!("{}/maps/api/geocode/json", self.base_url);
        let request = self
            .client
            .get(&url)
            .query(&[("address", address), ("key", self.api_key.as_str())]);

        let response: GeocodeResponse = fetch_json(PROVIDER, request).await?;

        match response.status.as_deref() {
            None | Some("OK" | "ZERO_RESULTS") => Ok(response.results),
            Some(status) => Err(ProviderError::Rejected {
                provider: PROVIDER,
                message: response
                    .error_message
                    .unwrap_or_else(|| status.to_string()),
            }),
        }
    }
}
