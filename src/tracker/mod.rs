mod error;
mod positions;
mod session;
mod tracker;
mod types;

pub use error::TrackerError;
pub use session::{Session, SessionStore};
pub use tracker::{Tracker, TrackerStatus, DEFAULT_PERIOD};
pub use types::{ObservingTime, TrackedObject};
