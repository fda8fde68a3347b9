//! Canonical records served to clients.
//!
//! Each record is decoupled from the provider payload it is built from: the
//! `from_*` constructors tolerate absent optional fields and the store only
//! ever sees the canonical shape.

pub mod film;
pub mod forecast;
pub mod happening;
pub mod place;

use std::fmt;

pub use film::Film;
pub use forecast::Forecast;
pub use happening::Happening;
pub use place::Place;

/// Format used for calendar date strings, e.g. `Sun Oct 18 2026`.
pub const DATE_FORMAT: &str = "%a %b %d %Y";

/// The resource kinds served from the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Place,
    Forecast,
    Happening,
    Film,
}

impl Kind {
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Place => "locations",
            Self::Forecast => "weathers",
            Self::Happening => "events",
            Self::Film => "movies",
        }
    }

    /// Column holding the cache key for this kind.
    #[must_use]
    pub const fn key_column(self) -> &'static str {
        match self {
            Self::Place => "search_query",
            Self::Forecast | Self::Happening | Self::Film => "location_id",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Place => "place",
            Self::Forecast => "forecast",
            Self::Happening => "happening",
            Self::Film => "film",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
