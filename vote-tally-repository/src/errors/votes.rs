//! Error types for the votes repository.
//! Defines specific errors that can occur while reading or mutating vote counters.
use thiserror::Error;
use vote_tally_shared::types::TargetKind;

/// Represents errors that can occur within the votes repository.
///
/// This enum consolidates storage failures such as SQLx errors, missing
/// target rows and malformed target identifiers. Any of them must abort the
/// surrounding transaction.
#[derive(Debug, Error)]
pub enum VotesRepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("{kind} not found: {target_id}")]
    TargetNotFound { kind: TargetKind, target_id: String },

    #[error("Invalid target id: {0}")]
    InvalidTargetId(String),
}

impl VotesRepositoryError {
    pub fn target_not_found(kind: TargetKind, target_id: &str) -> Self {
        Self::TargetNotFound {
            kind,
            target_id: target_id.to_string(),
        }
    }
}
