//! Cache-aside resolution shared by every record kind.

use std::future::Future;
use tracing::{debug, info};

use super::LookupError;
use crate::db::{CachedRecord, Store};

/// Checks the store for a key and only falls back to the miss handler when
/// nothing is cached.
#[derive(Clone)]
pub struct Resolver {
    store: Store,
}

impl Resolver {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    /// Returns the rows cached under `key`, or the records produced by
    /// `on_miss` when there are none.
    ///
    /// `on_miss` owns fetching, shaping and persisting; it runs at most once
    /// and never on a hit. A store read failure is returned as-is without
    /// retrying.
    pub async fn resolve<R, F, Fut>(&self, key: R::Key, on_miss: F) -> Result<Vec<R>, LookupError>
    where
        R: CachedRecord,
        F: FnOnce(R::Key) -> Fut,
        Fut: Future<Output = Result<Vec<R>, LookupError>>,
    {
        let cached = self.store.find::<R>(&key).await?;

        if !cached.is_empty() {
            debug!(kind = %R::KIND, %key, rows = cached.len(), "Cache hit");
            metrics::counter!(
                "cache_lookups_total",
                "kind" => R::KIND.as_str(),
                "outcome" => "hit"
            )
            .increment(1);
            return Ok(cached);
        }

        info!(
            kind = %R::KIND,
            table = R::KIND.table(),
            key_column = R::KIND.key_column(),
            %key,
            "Cache miss, fetching from provider"
        );
        metrics::counter!(
            "cache_lookups_total",
            "kind" => R::KIND.as_str(),
            "outcome" => "miss"
        )
        .increment(1);

        on_miss(key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Forecast, Place};
    use std::sync::atomic::{AtomicUsize, Ordering};

    async fn memory_store() -> Store {
        Store::with_pool_options("sqlite::memory:", 1, 1)
            .await
            .expect("in-memory store")
    }

    fn forecast(summary: &str, location_id: i32) -> Forecast {
        Forecast {
            forecast: summary.to_string(),
            time: "Sun Oct 18 2026".to_string(),
            location_id,
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let store = memory_store().await;
        let resolver = Resolver::new(store.clone());
        let calls = AtomicUsize::new(0);

        let miss_handler = |location_id: i32| {
            let store = store.clone();
            let calls = &calls;
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                let rows = vec![forecast("Rain", location_id), forecast("Sun", location_id)];
                store.insert_many(location_id, &rows).await?;
                Ok::<_, LookupError>(rows)
            }
        };

        let first = resolver.resolve::<Forecast, _, _>(5, miss_handler).await.unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        let second = resolver
            .resolve::<Forecast, _, _>(5, |_| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(Vec::new())
            })
            .await
            .unwrap();

        assert_eq!(second, first);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_keys_are_isolated() {
        let store = memory_store().await;
        store.insert_many(1, &[forecast("Fog", 1)]).await.unwrap();

        let resolver = Resolver::new(store);
        let rows = resolver
            .resolve::<Forecast, _, _>(2, |_| async { Ok(Vec::new()) })
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_miss_handler_error_propagates() {
        let resolver = Resolver::new(memory_store().await);

        let result = resolver
            .resolve::<Place, _, _>("Atlantis".to_string(), |query| async move {
                Err(LookupError::NotFound(query))
            })
            .await;

        assert!(matches!(result, Err(LookupError::NotFound(q)) if q == "Atlantis"));
    }
}
