use axum::{Json, extract::State};
use std::sync::Arc;

use super::params::DataParams;
use super::{ApiError, AppState};
use crate::models::Happening;
use crate::services::EventsQuery;

/// `GET /events?data[id]=..&data[formatted_query]=..`
pub async fn get_events(
    State(state): State<Arc<AppState>>,
    params: DataParams,
) -> Result<Json<Vec<Happening>>, ApiError> {
    let query = EventsQuery {
        location_id: params.parse("id")?,
        formatted_query: params.field("formatted_query")?.to_string(),
    };

    let happenings = state.lookup().events(&query).await?;
    Ok(Json(happenings))
}
