use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("request failed: {0}")]
    Http(#[from] restson::Error),
    #[error("service rejected target {id}: {message}")]
    Target { id: String, message: String },
}
