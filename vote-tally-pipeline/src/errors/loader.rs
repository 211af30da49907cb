//! Error types for the loader module of the Vote Tally Pipeline.
//! Defines specific errors that can occur while applying a vote transition
//! to a target's counters.
use thiserror::Error;
use vote_tally_repository::VotesRepositoryError;

/// Represents errors that can occur within the counter loader.
///
/// Any of these must roll back the caller's transaction.
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("Processor error: {0}")]
    Processor(#[from] crate::errors::ProcessorError),
    #[error("Votes repository error: {0}")]
    Repository(#[from] VotesRepositoryError),
    #[error("Counter invariant violated for {target_id}: {details}")]
    CounterInvariant { target_id: String, details: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_invariant_message() {
        let err = LoaderError::CounterInvariant {
            target_id: "a".to_string(),
            details: "upvotes=-1 downvotes=0 votes=-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Counter invariant violated for a: upvotes=-1 downvotes=0 votes=-1"
        );
    }
}
