use axum::{Json, extract::State};
use std::sync::Arc;

use super::params::DataParams;
use super::{ApiError, AppState};
use crate::models::Place;

/// `GET /location?data=<free text>`
pub async fn get_location(
    State(state): State<Arc<AppState>>,
    params: DataParams,
) -> Result<Json<Place>, ApiError> {
    let query = params.text()?;
    let place = state.lookup().location(query).await?;
    Ok(Json(place))
}
