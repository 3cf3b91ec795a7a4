use thiserror::Error;

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("snapshot not found: {0}")]
    NotFound(String),
    #[error("timestamp out of range: {0}")]
    InvalidTimestamp(String),
    #[error("current snapshot unavailable")]
    CurrentUnavailable,
}
