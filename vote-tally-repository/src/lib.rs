//! # Vote Tally Repository
//! This crate provides the storage interface for votable targets and its
//! implementations. It includes definitions for errors, the repository trait,
//! a PostgreSQL backend and a transactional in-memory backend.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::VotesRepositoryError;
pub use interfaces::VotableTargetRepository;
pub use memory::{InMemoryTransaction, InMemoryVotableRepository, InMemoryVoteStore};
pub use postgres::{MIGRATOR, PostgresVotableRepository, check_tables_created};
