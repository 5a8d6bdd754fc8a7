use thiserror::Error;

use crate::astro::LocationError;
use crate::service::ServiceError;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("position updates already running")]
    AlreadyRunning,
    #[error("observer location not known yet")]
    LocationUnavailable,
    #[error("observer location already set")]
    LocationAlreadySet,
    #[error("invalid location: {0}")]
    Location(#[from] LocationError),
    #[error("invalid observing time: {0:?}")]
    InvalidTime(String),
    #[error("no tracked object at index {0}")]
    NotFound(usize),
    #[error("target lookup failed: {0}")]
    Service(#[from] ServiceError),
}
