mod search;
mod types;

pub use search::{find, search};
pub use types::{CatalogEntry, CatalogHit, CatalogInfo};
