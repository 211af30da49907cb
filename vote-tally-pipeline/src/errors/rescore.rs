use thiserror::Error;
use vote_tally_repository::VotesRepositoryError;

/// Represents errors that can occur while recomputing stored success rates.
#[derive(Debug, Error)]
pub enum RescoreError {
    #[error("Votes repository error: {0}")]
    Repository(#[from] VotesRepositoryError),
}
