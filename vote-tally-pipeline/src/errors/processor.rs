//! Error types for the processor module of the Vote Tally Pipeline.
//! Defines the validation errors raised while resolving a vote transition.
use thiserror::Error;
use vote_tally_shared::types::{InvalidVoteOperation, VoteOperation};

/// Represents errors that can occur while resolving a vote transition.
///
/// Both variants are caller programming errors: they are raised before any
/// storage access and are never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcessorError {
    #[error("Invalid vote operation: {0}")]
    InvalidOperation(String),
    #[error("Missing {field} for {operation} vote operation")]
    MissingValue {
        operation: VoteOperation,
        field: &'static str,
    },
}

impl From<InvalidVoteOperation> for ProcessorError {
    fn from(err: InvalidVoteOperation) -> Self {
        Self::InvalidOperation(err.0)
    }
}
