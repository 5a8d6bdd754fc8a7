use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::tracker::ObservingTime;
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct FixTimeRequest {
    /// RFC 3339 timestamp (the dashboard sends UTC), or `YYYY-MM-DDTHH:MM`
    /// in server local time
    pub custom_time: String,
}

#[utoipa::path(
    get,
    path = "/api/time",
    tag = "time",
    responses(
        (status = 200, description = "Current observing time", body = ObservingTime)
    )
)]
pub async fn get(State(state): State<AppState>) -> Json<ObservingTime> {
    Json(state.tracker.lock().await.observing_time())
}

#[utoipa::path(
    put,
    path = "/api/time",
    tag = "time",
    request_body = FixTimeRequest,
    responses(
        (status = 200, description = "Observing time fixed", body = ObservingTime),
        (status = 400, description = "Unparseable time", body = ErrorResponse)
    )
)]
pub async fn fix(
    State(state): State<AppState>,
    Json(request): Json<FixTimeRequest>,
) -> ApiResult<Json<ObservingTime>> {
    let tracker = state.tracker.lock().await;
    Ok(Json(tracker.fix_time(&request.custom_time)?))
}

#[utoipa::path(
    delete,
    path = "/api/time",
    tag = "time",
    responses(
        (status = 200, description = "Back to the live clock", body = ObservingTime)
    )
)]
pub async fn reset(State(state): State<AppState>) -> Json<ObservingTime> {
    Json(state.tracker.lock().await.use_live_clock())
}
