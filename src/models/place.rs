use serde::{Deserialize, Serialize};

use crate::clients::geocode::GeocodeResult;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub search_query: String,
    pub formatted_query: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Assigned by the store on first insert.
    pub id: Option<i32>,
}

impl Place {
    /// Builds a place from a geocoding hit. Returns `None` when the hit has no
    /// coordinates, since a place without them is unusable downstream.
    #[must_use]
    pub fn from_geocode(search_query: &str, result: &GeocodeResult) -> Option<Self> {
        let coordinates = result.coordinates()?;

        Some(Self {
            search_query: search_query.to_string(),
            formatted_query: result.formatted_address.clone().unwrap_or_default(),
            latitude: coordinates.lat,
            longitude: coordinates.lng,
            id: None,
        })
    }

    #[must_use]
    pub const fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::geocode::{Geometry, LatLng};

    #[test]
    fn test_from_geocode() {
        let result = GeocodeResult {
            formatted_address: Some("Seattle, WA, USA".to_string()),
            geometry: Some(Geometry {
                location: Some(LatLng {
                    lat: 47.6,
                    lng: -122.3,
                }),
            }),
        };

        let place = Place::from_geocode("Seattle", &result).unwrap();
        assert_eq!(place.search_query, "Seattle");
        assert_eq!(place.formatted_query, "Seattle, WA, USA");
        assert!((place.latitude - 47.6).abs() < f64::EPSILON);
        assert!((place.longitude + 122.3).abs() < f64::EPSILON);
        assert_eq!(place.id, None);
        assert_eq!(place.with_id(7).id, Some(7));
    }

    #[test]
    fn test_from_geocode_without_geometry() {
        let result = GeocodeResult {
            formatted_address: Some("Nowhere".to_string()),
            geometry: None,
        };
        assert!(Place::from_geocode("nowhere", &result).is_none());
    }

    #[test]
    fn test_from_geocode_without_address() {
        let result = GeocodeResult {
            formatted_address: None,
            geometry: Some(Geometry {
                location: Some(LatLng { lat: 1.0, lng: 2.0 }),
            }),
        };
        let place = Place::from_geocode("somewhere", &result).unwrap();
        assert_eq!(place.formatted_query, "");
    }
}
