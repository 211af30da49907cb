mod target_kind;
mod vote_counters;
mod vote_delta;
mod vote_operation;

pub use target_kind::TargetKind;
pub use vote_counters::{TargetCounters, VoteCounters, VoteOutcome};
pub use vote_delta::VoteDelta;
pub use vote_operation::{InvalidVoteOperation, VoteOperation};
