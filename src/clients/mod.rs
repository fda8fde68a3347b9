pub mod eventbrite;
pub mod geocode;
pub mod tmdb;
pub mod weather;

use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, warn};

/// Failure talking to a third-party data provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} returned {status}: {body}")]
    Status {
        provider: &'static str,
        status: StatusCode,
        body: String,
    },

    #[error("{provider} returned an unreadable body: {source}")]
    Decode {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} rejected the request: {message}")]
    Rejected {
        provider: &'static str,
        message: String,
    },
}

impl ProviderError {
    #[must_use]
    pub const fn provider(&self) -> &'static str {
        match self {
            Self::Http { provider, .. }
            | Self::Status { provider, .. }
            | Self::Decode { provider, .. }
            | Self::Rejected { provider, .. } => provider,
        }
    }
}

/// Sends `request` and decodes a JSON body, mapping every failure mode onto
/// [`ProviderError`].
pub(crate) async fn fetch_json<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let result = send_and_decode(provider, request).await;

    let outcome = if result.is_ok() { "success" } else { "error" };
    metrics::counter!("provider_requests_total", "provider" => provider, "outcome" => outcome)
        .increment(1);

    result
}

async fn send_and_decode<T: DeserializeOwned>(
    provider: &'static str,
    request: RequestBuilder,
) -> Result<T, ProviderError> {
    let response = request
        .send()
        .await
        .map_err(|source| ProviderError::Http { provider, source })?;

    let status = response.status();
    debug!(provider, %status, "Provider responded");

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            provider,
            status,
            body,
        });
    }

    response
        .json::<T>()
        .await
        .map_err(|source| ProviderError::Decode { provider, source })
}

/// Decodes each list entry on its own. Entries with the wrong shape are
/// logged and skipped so the rest of the batch survives.
fn decode_entries<T: DeserializeOwned>(
    provider: &'static str,
    entries: Vec<serde_json::Value>,
) -> Vec<T> {
    let total = entries.len();
    let decoded: Vec<T> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(provider, index, error = %e, "Skipping malformed provider entry");
                None
            }
        })
        .collect();

    if decoded.len() < total {
        metrics::counter!("provider_entries_skipped_total", "provider" => provider)
            .increment((total - decoded.len()) as u64);
    }

    decoded
}

fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Entry {
        name: Option<String>,
    }

    #[test]
    fn test_decode_entries_skips_wrong_shapes() {
        let entries = vec![
            json!({ "name": "kept" }),
            json!({ "name": { "text": "nested" } }),
            json!("not an object"),
            json!({}),
        ];

        let decoded: Vec<Entry> = decode_entries("test", entries);
        assert_eq!(
            decoded,
            vec![
                Entry {
                    name: Some("kept".to_string())
                },
                Entry { name: None },
            ]
        );
    }

    #[test]
    fn test_trim_base_url() {
        assert_eq!(trim_base_url("http://localhost:9000/"), "http://localhost:9000");
    }
}
