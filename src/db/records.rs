//! Mapping between canonical records and their table rows.

use sea_orm::{EntityTrait, Set, Value};
use std::fmt;

use crate::entities::{events, locations, movies, weathers};
use crate::models::{Film, Forecast, Happening, Kind, Place};

/// A record kind served from the cache, keyed by one column of its table.
pub trait CachedRecord: Sized + Send + Sync {
    type Entity: EntityTrait;

    /// Value of the lookup column (`search_query` or `location_id`).
    type Key: Clone + fmt::Display + Into<Value> + Send + Sync;

    const KIND: Kind;

    fn key_column() -> <Self::Entity as EntityTrait>::Column;

    /// Column used to return rows in insertion order.
    fn order_column() -> <Self::Entity as EntityTrait>::Column;

    fn from_model(model: <Self::Entity as EntityTrait>::Model) -> Self;
}

/// A record scoped to a place through `location_id`.
pub trait ChildRecord: CachedRecord<Key = i32> {
    fn to_active_model(&self, location_id: i32) -> <Self::Entity as EntityTrait>::ActiveModel;
}

impl CachedRecord for Place {
    type Entity = locations::Entity;
    type Key = String;

    const KIND: Kind = Kind::Place;

    fn key_column() -> locations::Column {
        locations::Column::SearchQuery
    }

    fn order_column() -> locations::Column {
        locations::Column::Id
    }

    fn from_model(model: locations::Model) -> Self {
        Self {
            search_query: model.search_query,
            formatted_query: model.formatted_query,
            latitude: model.latitude,
            longitude: model.longitude,
            id: Some(model.id),
        }
    }
}

impl CachedRecord for Forecast {
    type Entity = weathers::Entity;
    type Key = i32;

    const KIND: Kind = Kind::Forecast;

    fn key_column() -> weathers::Column {
        weathers::Column::LocationId
    }

    fn order_column() -> weathers::Column {
        weathers::Column::Id
    }

    fn from_model(model: weathers::Model) -> Self {
        Self {
            forecast: model.forecast,
            time: model.time,
            location_id: model.location_id,
        }
    }
}

impl ChildRecord for Forecast {
    fn to_active_model(&self, location_id: i32) -> weathers::ActiveModel {
        weathers::ActiveModel {
            forecast: Set(self.forecast.clone()),
            time: Set(self.time.clone()),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}

impl CachedRecord for Happening {
    type Entity = events::Entity;
    type Key = i32;

    const KIND: Kind = Kind::Happening;

    fn key_column() -> events::Column {
        events::Column::LocationId
    }

    fn order_column() -> events::Column {
        events::Column::Id
    }

    fn from_model(model: events::Model) -> Self {
        Self {
            link: model.link,
            name: model.name,
            event_date: model.event_date,
            summary: model.summary,
            location_id: model.location_id,
        }
    }
}

impl ChildRecord for Happening {
    fn to_active_model(&self, location_id: i32) -> events::ActiveModel {
        events::ActiveModel {
            link: Set(self.link.clone()),
            name: Set(self.name.clone()),
            event_date: Set(self.event_date.clone()),
            summary: Set(self.summary.clone()),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}

impl CachedRecord for Film {
    type Entity = movies::Entity;
    type Key = i32;

    const KIND: Kind = Kind::Film;

    fn key_column() -> movies::Column {
        movies::Column::LocationId
    }

    fn order_column() -> movies::Column {
        movies::Column::Id
    }

    fn from_model(model: movies::Model) -> Self {
        Self {
            title: model.title,
            overview: model.overview,
            average_votes: model.average_votes,
            total_votes: model.total_votes,
            image_url: model.image_url,
            popularity: model.popularity,
            released_on: model.released_on,
            location_id: model.location_id,
        }
    }
}

impl ChildRecord for Film {
    fn to_active_model(&self, location_id: i32) -> movies::ActiveModel {
        movies::ActiveModel {
            title: Set(self.title.clone()),
            overview: Set(self.overview.clone()),
            average_votes: Set(self.average_votes),
            total_votes: Set(self.total_votes),
            image_url: Set(self.image_url.clone()),
            popularity: Set(self.popularity),
            released_on: Set(self.released_on.clone()),
            location_id: Set(location_id),
            ..Default::default()
        }
    }
}
