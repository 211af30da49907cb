//! Error types for the vote tally repository.
//! Consolidates and re-exports error types related to votable target storage.
mod votes;

pub use votes::VotesRepositoryError;
