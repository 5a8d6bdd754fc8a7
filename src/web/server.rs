use axum::{routing::delete, routing::get, Router};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::astro::Location;
use crate::service::Client;
use crate::tracker::{Session, SessionStore, Tracker};

use super::api::catalog as catalog_handlers;
use super::api::location as location_handlers;
use super::api::time as time_handlers;
use super::api::tracking as tracking_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid service url: {0}")]
    Service(#[from] crate::service::ServiceError),
    #[error("invalid station coordinates: {0}")]
    Station(#[from] crate::astro::LocationError),
    #[error("tracker error: {0}")]
    Tracker(#[from] crate::tracker::TrackerError),
}

pub async fn run_server(config: Config) -> Result<(), ServerError> {
    let bind_addr = config.web.bind.clone();
    let service = Client::new(&config.service.base_url)?;

    let location = config
        .station
        .as_ref()
        .map(|s| Location::from_coordinates(&s.coordinates))
        .transpose()?;

    let store = SessionStore::new(config.session.path.clone());
    let session = store.load().unwrap_or_else(|e| {
        log::warn!(
            "Failed to load session from {}: {}",
            config.session.path.display(),
            e
        );
        Session::default()
    });
    log::info!("Restored {} tracked objects", session.tracking.len());

    let mut tracker = Tracker::new(session, location, Some(store));
    tracker.start(config.tracker.update_interval)?;

    let state = AppState {
        config: Arc::new(config),
        service: Arc::new(service),
        catalog: Arc::new(RwLock::new(Vec::new())),
        tracker: Arc::new(Mutex::new(tracker)),
    };
    state.spawn_catalog_fetch();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        // UI routes
        .route("/", get(ui_handlers::dashboard))
        // Catalog API endpoints
        .route("/api/catalog", get(catalog_handlers::search))
        .route("/api/catalog/{id}", get(catalog_handlers::info))
        // Tracking API endpoints
        .route(
            "/api/tracking",
            get(tracking_handlers::status).post(tracking_handlers::add),
        )
        .route(
            "/api/tracking/{index}",
            delete(tracking_handlers::remove),
        )
        // Observing time
        .route(
            "/api/time",
            get(time_handlers::get)
                .put(time_handlers::fix)
                .delete(time_handlers::reset),
        )
        // Observer location
        .route(
            "/api/location",
            get(location_handlers::get).post(location_handlers::set),
        )
        // Static files
        .nest_service("/static", ServeDir::new("static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let mut tracker = state.tracker.lock().await;
    tracker.stop().await;
    if let Err(e) = tracker.save() {
        log::error!("Failed to save session on shutdown: {}", e);
    }
    log::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
