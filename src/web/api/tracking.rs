use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::catalog;
use crate::tracker::{TrackedObject, TrackerError, TrackerStatus};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddTargetRequest {
    /// Catalog id, NGC designation or name of the object
    pub id: String,
}

#[utoipa::path(
    get,
    path = "/api/tracking",
    tag = "tracking",
    responses(
        (status = 200, description = "Tracked objects with current positions", body = TrackerStatus)
    )
)]
pub async fn status(State(state): State<AppState>) -> Json<TrackerStatus> {
    let tracker = state.tracker.lock().await;
    Json(tracker.status())
}

#[utoipa::path(
    post,
    path = "/api/tracking",
    tag = "tracking",
    request_body = AddTargetRequest,
    responses(
        (status = 201, description = "Object added to the tracking list", body = TrackedObject),
        (status = 400, description = "Validation error", body = ErrorResponse),
        (status = 409, description = "Observer location not known yet", body = ErrorResponse),
        (status = 502, description = "Target lookup failed", body = ErrorResponse)
    )
)]
pub async fn add(
    State(state): State<AppState>,
    Json(request): Json<AddTargetRequest>,
) -> ApiResult<(StatusCode, Json<TrackedObject>)> {
    let id = request.id.trim();
    if id.is_empty() {
        return Err(ApiError::Validation("id must not be empty".into()));
    }

    let (location, time) = {
        let tracker = state.tracker.lock().await;
        let location = tracker
            .location()
            .ok_or(TrackerError::LocationUnavailable)?;
        (location, tracker.observing_time().fixed_at())
    };

    let catalog_name = {
        let entries = state.catalog.read().await;
        catalog::find(&entries, id).and_then(|e| e.name.clone())
    };

    let detail = state
        .service
        .target(id, location, time)
        .await
        .map_err(|e| {
            log::error!("Target fetch failed for {}: {}", id, e);
            TrackerError::from(e)
        })?;

    let object = TrackedObject::from_detail(id, catalog_name.as_deref(), detail);
    state.tracker.lock().await.add(object.clone());

    Ok((StatusCode::CREATED, Json(object)))
}

#[utoipa::path(
    delete,
    path = "/api/tracking/{index}",
    tag = "tracking",
    params(
        ("index" = usize, Path, description = "Position in the tracking list")
    ),
    responses(
        (status = 200, description = "Removed object", body = TrackedObject),
        (status = 404, description = "No object at that index", body = ErrorResponse)
    )
)]
pub async fn remove(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<Json<TrackedObject>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.remove(index)?))
}
