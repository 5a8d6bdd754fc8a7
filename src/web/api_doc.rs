use utoipa::OpenApi;

use super::api::catalog::SearchQuery;
use super::api::error::ErrorResponse;
use super::api::location::SetLocationRequest;
use super::api::time::FixTimeRequest;
use super::api::tracking::AddTargetRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::catalog::search,
        super::api::catalog::info,
        super::api::tracking::status,
        super::api::tracking::add,
        super::api::tracking::remove,
        super::api::time::get,
        super::api::time::fix,
        super::api::time::reset,
        super::api::location::get,
        super::api::location::set,
    ),
    components(
        schemas(
            ErrorResponse,
            SearchQuery,
            AddTargetRequest,
            FixTimeRequest,
            SetLocationRequest,
            crate::catalog::CatalogEntry,
            crate::catalog::CatalogHit,
            crate::catalog::CatalogInfo,
            crate::tracker::TrackedObject,
            crate::tracker::TrackerStatus,
            crate::tracker::ObservingTime,
            crate::astro::Location,
        )
    ),
    info(
        title = "Star Tracker API",
        description = "Catalog search, target tracking and observing time control",
        version = "0.1.0"
    ),
    tags(
        (name = "catalog", description = "Object catalog"),
        (name = "tracking", description = "Tracked objects and their positions"),
        (name = "time", description = "Observing time"),
        (name = "location", description = "Observer location")
    )
)]
pub struct ApiDoc;
