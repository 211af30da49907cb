//! Error types for the Vote Tally application.
//! Consolidates errors from configuration, the database pool, the repository
//! and the pipeline into a single type returned to callers.
use vote_tally_pipeline::errors::{LoaderError, RescoreError};
use vote_tally_repository::VotesRepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum TallyError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Repository error: {0}")]
    Repository(#[from] VotesRepositoryError),
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),
    #[error("Rescore error: {0}")]
    Rescore(#[from] RescoreError),
}

impl TallyError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
