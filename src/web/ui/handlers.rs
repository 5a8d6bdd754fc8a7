use axum::{extract::State, response::IntoResponse};

use crate::web::state::AppState;

use super::templates::DashboardTemplate;

pub async fn dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let location_known = state.tracker.lock().await.location().is_some();
    DashboardTemplate {
        station_name: state.config.station.as_ref().and_then(|s| s.name.clone()),
        location_known,
        refresh_ms: state.config.tracker.update_interval.as_millis(),
    }
}
