//! # Vote Tally Shared
//! This crate defines shared data structures and types used across the vote tally crates.
//! It includes the votable target kinds, vote lifecycle operations, counter deltas and
//! the aggregated counters stored on each target.
pub mod types;
