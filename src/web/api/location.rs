use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::astro::Location;
use crate::tracker::TrackerError;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetLocationRequest {
    pub lat: f64,
    pub lon: f64,
}

#[utoipa::path(
    get,
    path = "/api/location",
    tag = "location",
    responses(
        (status = 200, description = "Observer location, null until known", body = Option<Location>)
    )
)]
pub async fn get(State(state): State<AppState>) -> Json<Option<Location>> {
    Json(state.tracker.lock().await.location())
}

#[utoipa::path(
    post,
    path = "/api/location",
    tag = "location",
    request_body = SetLocationRequest,
    responses(
        (status = 200, description = "Location stored", body = Location),
        (status = 400, description = "Coordinates out of range", body = ErrorResponse),
        (status = 409, description = "Location already set", body = ErrorResponse)
    )
)]
pub async fn set(
    State(state): State<AppState>,
    Json(request): Json<SetLocationRequest>,
) -> ApiResult<Json<Location>> {
    let location = Location::new(request.lat, request.lon).map_err(TrackerError::from)?;
    state.tracker.lock().await.set_location(location)?;
    Ok(Json(location))
}
