//! Vote Tally Library
//!
//! This library wires the vote tally crates into an application: configuration
//! management, error handling, dependency injection and the transaction-owning
//! `VoteTally` facade used by request handlers.

pub mod config;
pub mod errors;
pub mod tally;

pub use config::{Dependencies, LogFormat, TallyConfig};
pub use errors::TallyError;
pub use tally::VoteTally;
