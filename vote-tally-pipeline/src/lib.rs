//! # Vote Tally Pipeline
//! This crate turns vote lifecycle transitions into counter updates.
//! It includes the delta resolver and confidence scorer (processor), the
//! generic counter orchestration (loader), the success rate repair job
//! (rescore), along with error handling.
pub mod loader;
pub mod processor;
pub mod rescore;

pub mod errors;
