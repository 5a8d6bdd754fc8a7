mod client;
mod error;
mod types;

pub use client::Client;
pub use error::ServiceError;
pub use types::TargetDetail;
