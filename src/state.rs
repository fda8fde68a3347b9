use std::sync::Arc;

use crate::clients::eventbrite::EventbriteClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::tmdb::MovieClient;
use crate::clients::weather::WeatherClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::LookupService;

/// Build a shared HTTP client for all provider calls so they share one
/// connection pool. The timeout bounds every provider request.
fn build_shared_http_client(
    timeout_seconds: u64,
    user_agent: &str,
) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(timeout_seconds))
        .user_agent(user_agent)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub lookup: Arc<LookupService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_url,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let providers = &config.providers;
        let http_client =
            build_shared_http_client(providers.request_timeout_seconds, &providers.user_agent)?;

        let lookup = Arc::new(LookupService::new(
            store.clone(),
            GeocodeClient::with_shared_client(http_client.clone(), &providers.geocode),
            WeatherClient::with_shared_client(http_client.clone(), &providers.weather),
            EventbriteClient::with_shared_client(http_client.clone(), &providers.events),
            MovieClient::with_shared_client(http_client, &providers.movies),
        ));

        Ok(Self {
            config: Arc::new(config),
            store,
            lookup,
        })
    }
}
