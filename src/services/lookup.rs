//! Per-resource lookups: each pairs the shared [`Resolver`] with the provider
//! call, record construction and persistence to run on a cache miss.

use thiserror::Error;
use tracing::{debug, info};

use super::Resolver;
use crate::clients::ProviderError;
use crate::clients::eventbrite::EventbriteClient;
use crate::clients::geocode::GeocodeClient;
use crate::clients::tmdb::MovieClient;
use crate::clients::weather::WeatherClient;
use crate::db::{Store, StoreError};
use crate::models::{Film, Forecast, Happening, Place};

#[derive(Debug, Error)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Forecast lookup for a stored place.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub location_id: i32,
    pub latitude: f64,
    pub longitude: f64,
}

/// Event lookup for a stored place, searched by its formatted address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsQuery {
    pub location_id: i32,
    pub formatted_query: String,
}

/// Movie lookup for a stored place. The place's search text doubles as the
/// movie title query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoviesQuery {
    pub location_id: i32,
    pub search_query: String,
}

pub struct LookupService {
    resolver: Resolver,
    geocode: GeocodeClient,
    weather: WeatherClient,
    events: EventbriteClient,
    movies: MovieClient,
}

impl LookupService {
    #[must_use]
    pub const fn new(
        store: Store,
        geocode: GeocodeClient,
        weather: WeatherClient,
        events: EventbriteClient,
        movies: MovieClient,
    ) -> Self {
        Self {
            resolver: Resolver::new(store),
            geocode,
            weather,
            events,
            movies,
        }
    }

    fn store(&self) -> &Store {
        self.resolver.store()
    }

    /// Resolves a free-text query to a single stored place.
    ///
    /// # Errors
    ///
    /// - [`LookupError::NotFound`] when the geocoder has no usable match
    /// - [`LookupError::Provider`] when the geocoder call fails
    /// - [`LookupError::Store`] on database failures
    pub async fn location(&self, query: &str) -> Result<Place, LookupError> {
        let query = query.trim().to_string();

        let places = self
            .resolver
            .resolve::<Place, _, _>(query.clone(), |query| self.fetch_place(query))
            .await?;

        places
            .into_iter()
            .next()
            .ok_or_else(|| LookupError::NotFound(format!("no location for '{query}'")))
    }

    pub async fn weather(&self, query: &WeatherQuery) -> Result<Vec<Forecast>, LookupError> {
        self.resolver
            .resolve::<Forecast, _, _>(query.location_id, |location_id| {
                self.fetch_forecasts(location_id, query.latitude, query.longitude)
            })
            .await
    }

    pub async fn events(&self, query: &EventsQuery) -> Result<Vec<Happening>, LookupError> {
        self.resolver
            .resolve::<Happening, _, _>(query.location_id, |location_id| {
                self.fetch_happenings(location_id, &query.formatted_query)
            })
            .await
    }

    pub async fn movies(&self, query: &MoviesQuery) -> Result<Vec<Film>, LookupError> {
        self.resolver
            .resolve::<Film, _, _>(query.location_id, |location_id| {
                self.fetch_films(location_id, &query.search_query)
            })
            .await
    }

    async fn fetch_place(&self, query: String) -> Result<Vec<Place>, LookupError> {
        let results = self.geocode.geocode(&query).await?;

        let place = results
            .first()
            .and_then(|result| Place::from_geocode(&query, result))
            .ok_or_else(|| LookupError::NotFound(format!("no geocoding match for '{query}'")))?;

        let place = match self.store().insert_place(&place).await? {
            Some(id) => {
                info!(id, search_query = %query, "Stored new location");
                place.with_id(id)
            }
            // A concurrent lookup stored the same query first.
            None => self
                .store()
                .find::<Place>(&query)
                .await?
                .into_iter()
                .next()
                .ok_or_else(|| LookupError::NotFound(format!("no stored location for '{query}'")))?,
        };

        Ok(vec![place])
    }

    async fn fetch_forecasts(
        &self,
        location_id: i32,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Forecast>, LookupError> {
        let days = self.weather.daily_forecast(latitude, longitude).await?;

        let forecasts: Vec<Forecast> = days
            .iter()
            .map(|day| Forecast::from_daily(day, location_id))
            .collect();

        self.store().insert_many(location_id, &forecasts).await?;
        debug!(location_id, count = forecasts.len(), "Fetched forecasts");

        Ok(forecasts)
    }

    async fn fetch_happenings(
        &self,
        location_id: i32,
        address: &str,
    ) -> Result<Vec<Happening>, LookupError> {
        let events = self.events.search_by_address(address).await?;

        let happenings: Vec<Happening> = events
            .iter()
            .map(|event| Happening::from_event(event, location_id))
            .collect();

        self.store().insert_many(location_id, &happenings).await?;
        debug!(location_id, count = happenings.len(), "Fetched events");

        Ok(happenings)
    }

    async fn fetch_films(
        &self,
        location_id: i32,
        search_query: &str,
    ) -> Result<Vec<Film>, LookupError> {
        let movies = self.movies.search(search_query).await?;

        let films: Vec<Film> = movies
            .iter()
            .map(|movie| Film::from_movie(movie, location_id))
            .collect();

        self.store().insert_many(location_id, &films).await?;
        debug!(location_id, count = films.len(), "Fetched movies");

        Ok(films)
    }
}
