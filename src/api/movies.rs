use axum::{Json, extract::State};
use std::sync::Arc;

use super::params::DataParams;
use super::{ApiError, AppState};
use crate::models::Film;
use crate::services::MoviesQuery;

/// `GET /movies?data[id]=..&data[search_query]=..`
pub async fn get_movies(
    State(state): State<Arc<AppState>>,
    params: DataParams,
) -> Result<Json<Vec<Film>>, ApiError> {
    let query = MoviesQuery {
        location_id: params.parse("id")?,
        search_query: params.field("search_query")?.to_string(),
    };

    let films = state.lookup().movies(&query).await?;
    Ok(Json(films))
}
