//! The `data` query parameter shared by every lookup endpoint.
//!
//! `/location` sends plain text (`?data=Seattle`). The other endpoints send an
//! object, either in bracket form (`?data[id]=1&data[latitude]=47.6`) or as a
//! JSON string (`?data={"id":1,"latitude":47.6}`).

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use std::collections::HashMap;
use std::str::FromStr;

use super::ApiError;

const DATA: &str = "data";

#[derive(Debug, Default)]
pub struct DataParams {
    text: Option<String>,
    fields: HashMap<String, String>,
}

impl DataParams {
    #[must_use]
    pub fn from_query(query: HashMap<String, String>) -> Self {
        let mut params = Self::default();

        for (key, value) in query {
            if key == DATA {
                params.fields.extend(json_fields(&value));
                params.text = Some(value);
            } else if let Some(field) = key
                .strip_prefix("data[")
                .and_then(|rest| rest.strip_suffix(']'))
            {
                params.fields.insert(field.to_string(), value);
            }
        }

        params
    }

    /// The plain-text form of `data`, trimmed.
    pub fn text(&self) -> Result<&str, ApiError> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation("missing query parameter: data"))
    }

    pub fn field(&self, name: &str) -> Result<&str, ApiError> {
        self.fields
            .get(name)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ApiError::validation(format!("missing query parameter: data[{name}]")))
    }

    pub fn parse<T: FromStr>(&self, name: &str) -> Result<T, ApiError> {
        let raw = self.field(name)?;
        raw.parse()
            .map_err(|_| ApiError::validation(format!("invalid value for data[{name}]: {raw}")))
    }
}

fn json_fields(value: &str) -> Vec<(String, String)> {
    let Ok(serde_json::Value::Object(map)) = serde_json::from_str(value) else {
        return Vec::new();
    };

    map.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

impl<S> FromRequestParts<S> for DataParams
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::validation(e.body_text()))?;

        Ok(Self::from_query(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> DataParams {
        DataParams::from_query(
            pairs
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_plain_text() {
        let p = params(&[("data", "  Seattle ")]);
        assert_eq!(p.text().unwrap(), "Seattle");
        assert!(p.field("id").is_err());
    }

    #[test]
    fn test_bracket_fields() {
        let p = params(&[
            ("data[id]", "3"),
            ("data[latitude]", "47.6"),
            ("data[longitude]", "-122.3"),
        ]);
        assert_eq!(p.parse::<i32>("id").unwrap(), 3);
        assert!((p.parse::<f64>("longitude").unwrap() + 122.3).abs() < f64::EPSILON);
        assert!(p.text().is_err());
    }

    #[test]
    fn test_json_object() {
        let p = params(&[("data", r#"{"id":7,"search_query":"Seattle"}"#)]);
        assert_eq!(p.parse::<i32>("id").unwrap(), 7);
        assert_eq!(p.field("search_query").unwrap(), "Seattle");
    }

    #[test]
    fn test_invalid_number() {
        let p = params(&[("data[id]", "seven")]);
        assert!(matches!(
            p.parse::<i32>("id"),
            Err(ApiError::ValidationError(_))
        ));
    }
}
