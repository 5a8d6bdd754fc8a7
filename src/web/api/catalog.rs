use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::catalog::{self, CatalogHit, CatalogInfo};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Case-insensitive substring of id, name or NGC designation
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

#[utoipa::path(
    get,
    path = "/api/catalog",
    tag = "catalog",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching catalog entries with their tracking ids", body = Vec<CatalogHit>)
    )
)]
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<CatalogHit>> {
    let entries = state.catalog.read().await;
    let hits = catalog::search(&entries, &query.q, query.limit)
        .into_iter()
        .filter_map(|e| e.to_hit())
        .collect();
    Json(hits)
}

#[utoipa::path(
    get,
    path = "/api/catalog/{id}",
    tag = "catalog",
    params(
        ("id" = String, Path, description = "Catalog id, NGC designation or name")
    ),
    responses(
        (status = 200, description = "Object details", body = CatalogInfo),
        (status = 404, description = "Not in the catalog", body = ErrorResponse)
    )
)]
pub async fn info(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<CatalogInfo>> {
    let entries = state.catalog.read().await;
    catalog::find(&entries, &id)
        .map(|entry| Json(entry.info()))
        .ok_or(ApiError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracker::Session;
    use crate::web::api::test_state;

    async fn state_with_catalog() -> AppState {
        let state = test_state(Session::default(), None);
        *state.catalog.write().await = serde_json::from_str(
            r#"[
                {"object ID": "M27", "name": "Dumbbell Nebula", "NGC": "NGC 6853", "constellation": "Vulpecula"},
                {"object ID": "M57", "name": "Ring Nebula", "NGC": "NGC 6720", "constellation": "Lyra"},
                {"object ID": "M13", "name": "Hercules Cluster", "NGC": "NGC 6205", "constellation": "Hercules"}
            ]"#,
        )
        .unwrap();
        state
    }

    #[tokio::test]
    async fn search_filters_catalog() {
        let state = state_with_catalog().await;
        let Json(hits) = search(
            State(state),
            Query(SearchQuery {
                q: "nebula".into(),
                limit: None,
            }),
        )
        .await;
        let ids: Vec<_> = hits.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["M27", "M57"]);
        assert_eq!(hits[1].entry.constellation.as_deref(), Some("Lyra"));
    }

    #[tokio::test]
    async fn info_by_ngc_designation() {
        let state = state_with_catalog().await;
        let Json(details) = info(State(state.clone()), Path("NGC 6720".into()))
            .await
            .unwrap();
        assert_eq!(details.constellation.as_deref(), Some("Lyra"));

        let missing = info(State(state), Path("M101".into())).await;
        assert!(matches!(missing, Err(ApiError::NotFound)));
    }
}
