use serde::{Deserialize, Serialize};

use crate::clients::tmdb::MovieEntry;

pub const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub overview: String,
    pub average_votes: f64,
    pub total_votes: i64,
    pub image_url: String,
    pub popularity: f64,
    pub released_on: String,
    pub location_id: i32,
}

impl Film {
    #[must_use]
    pub fn from_movie(movie: &MovieEntry, location_id: i32) -> Self {
        let image_url = movie
            .poster_path
            .as_deref()
            .map(|path| format!("{POSTER_BASE_URL}{path}"))
            .unwrap_or_default();

        Self {
            title: movie.title.clone().unwrap_or_default(),
            overview: movie.overview.clone().unwrap_or_default(),
            average_votes: movie.vote_average.unwrap_or_default(),
            total_votes: movie.vote_count.unwrap_or_default(),
            image_url,
            popularity: movie.popularity.unwrap_or_default(),
            released_on: movie.release_date.clone().unwrap_or_default(),
            location_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_movie() {
        let movie = MovieEntry {
            title: Some("Sleepless in Seattle".to_string()),
            overview: Some("A widowed architect...".to_string()),
            vote_average: Some(6.6),
            vote_count: Some(1525),
            poster_path: Some("/abc.jpg".to_string()),
            popularity: Some(11.2),
            release_date: Some("1993-06-24".to_string()),
        };

        let film = Film::from_movie(&movie, 4);
        assert_eq!(film.title, "Sleepless in Seattle");
        assert_eq!(film.total_votes, 1525);
        assert_eq!(film.image_url, "https://image.tmdb.org/t/p/w500/abc.jpg");
        assert_eq!(film.released_on, "1993-06-24");
        assert_eq!(film.location_id, 4);
    }

    #[test]
    fn test_from_movie_without_poster() {
        let movie = MovieEntry {
            title: Some("Untitled".to_string()),
            overview: None,
            vote_average: None,
            vote_count: None,
            poster_path: None,
            popularity: None,
            release_date: None,
        };

        let film = Film::from_movie(&movie, 1);
        assert_eq!(film.image_url, "");
        assert_eq!(film.overview, "");
        assert_eq!(film.total_votes, 0);
        assert!(film.average_votes.abs() < f64::EPSILON);
    }
}
