use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::catalog::CatalogEntry;
use crate::service::Client;
use crate::tracker::Tracker;

use super::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub service: Arc<Client>,
    pub catalog: Arc<RwLock<Vec<CatalogEntry>>>,
    pub tracker: Arc<Mutex<Tracker>>,
}

impl AppState {
    /// Fetches the catalog in the background. Failures are logged and leave
    /// the catalog empty.
    pub fn spawn_catalog_fetch(&self) {
        let service = self.service.clone();
        let catalog = self.catalog.clone();
        tokio::spawn(async move {
            match service.catalog().await {
                Ok(entries) => {
                    log::info!("Catalog loaded ({} objects)", entries.len());
                    *catalog.write().await = entries;
                }
                Err(e) => log::error!("Catalog fetch failed: {}", e),
            }
        });
    }
}
