pub mod lookup;
pub use lookup::{EventsQuery, LookupError, LookupService, MoviesQuery, WeatherQuery};

pub mod resolver;
pub use resolver::Resolver;
