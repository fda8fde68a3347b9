use reqwest::Client;
use serde::Deserialize;

use super::{ProviderError, decode_entries, fetch_json, trim_base_url};
use crate::config::ProviderConfig;

const PROVIDER: &str = "tmdb";

#[derive(Debug, Deserialize)]
struct MovieSearchResponse {
    #[serde(default)]
    results: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MovieEntry {
    pub title: Option<String>,
    pub overview: Option<String>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<i64>,
    pub poster_path: Option<String>,
    pub popularity: Option<f64>,
    pub release_date: Option<String>,
}

/// The Movie Database search client.
#[derive(Clone)]
pub struct MovieClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl MovieClient {
    #[must_use]
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Self {
        Self {
            client,
            base_url: trim_base_url(&config.base_url),
            api_key: config.api_key.clone(),
        }
    }

    /// Searches movies by title text. Only the first result page is used.
    pub async fn search(&self, query: &str) -> Result<Vec<MovieEntry>, ProviderError> {
        let url = format!("{}/3/search/movie", self.base_url);
        let request = self.client.get(&url).query(&[
            ("api_key", self.api_key.as_str()),
            ("language", "en-US"),
            ("query", query),
            ("page", "1"),
            ("include_adult", "false"),
        ]);

        let response: MovieSearchResponse = fetch_json(PROVIDER, request).await?;

        Ok(decode_entries(PROVIDER, response.results))
    }
}
