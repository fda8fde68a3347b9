use axum::{Json, extract::State};
use std::sync::Arc;

use super::params::DataParams;
use super::{ApiError, AppState};
use crate::models::Forecast;
use crate::services::WeatherQuery;

/// `GET /weather?data[id]=..&data[latitude]=..&data[longitude]=..`
pub async fn get_weather(
    State(state): State<Arc<AppState>>,
    params: DataParams,
) -> Result<Json<Vec<Forecast>>, ApiError> {
    let query = WeatherQuery {
        location_id: params.parse("id")?,
        latitude: params.parse("latitude")?,
        longitude: params.parse("longitude")?,
    };

    let forecasts = state.lookup().weather(&query).await?;
    Ok(Json(forecasts))
}
