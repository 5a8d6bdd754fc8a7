pub mod catalog;
pub mod error;
pub mod location;
pub mod time;
pub mod tracking;

#[cfg(test)]
pub(crate) fn test_state(
    session: crate::tracker::Session,
    location: Option<crate::astro::Location>,
) -> crate::web::state::AppState {
    use std::sync::Arc;
    use tokio::sync::{Mutex, RwLock};

    use crate::service::Client;
    use crate::tracker::Tracker;
    use crate::web::config::Config;
    use crate::web::state::AppState;

    let config = Config::from_str("service:\n  base_url: http://127.0.0.1:9/\n").unwrap();
    let service = Client::new(&config.service.base_url).unwrap();

    AppState {
        config: Arc::new(config),
        service: Arc::new(service),
        catalog: Arc::new(RwLock::new(Vec::new())),
        tracker: Arc::new(Mutex::new(Tracker::new(session, location, None))),
    }
}
