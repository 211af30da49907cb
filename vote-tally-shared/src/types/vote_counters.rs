use serde::{Deserialize, Serialize};
use crate::types::VoteDelta;

/// The aggregated vote counters stored on a votable target.
///
/// This struct mirrors the `upvote_count`, `downvote_count` and `vote_count`
/// columns of a listing row.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCounters {
    pub upvote_count: i64,
    pub downvote_count: i64,
    pub vote_count: i64,
}

impl VoteCounters {
    pub fn new(upvote_count: i64, downvote_count: i64, vote_count: i64) -> Self {
        Self {
            upvote_count,
            downvote_count,
            vote_count,
        }
    }

    /// Returns the counters after adding `delta` to each field.
    pub fn apply(&self, delta: &VoteDelta) -> Self {
        Self {
            upvote_count: self.upvote_count + delta.upvotes,
            downvote_count: self.downvote_count + delta.downvotes,
            vote_count: self.vote_count + delta.vote_count,
        }
    }

    /// Checks that no counter is negative and that the total matches its parts.
    pub fn is_consistent(&self) -> bool {
        self.upvote_count >= 0
            && self.downvote_count >= 0
            && self.vote_count == self.upvote_count + self.downvote_count
    }
}

/// The counters and stored success rate of a single target row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetCounters {
    pub target_id: String,
    pub counters: VoteCounters,
    pub success_rate: f64,
}

/// Result of applying one vote transition to a target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VoteOutcome {
    /// The transition resolved to a zero delta and storage was not touched.
    Unchanged,
    /// The counters were incremented and the success rate recomputed.
    Updated {
        counters: VoteCounters,
        success_rate: f64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_delta() {
        let counters = VoteCounters::new(4, 1, 5);
        let updated = counters.apply(&VoteDelta::new(-1, 0, -1));
        assert_eq!(updated, VoteCounters::new(3, 1, 4));
        assert!(updated.is_consistent());
    }

    #[test]
    fn test_negative_counters_are_inconsistent() {
        let counters = VoteCounters::default().apply(&VoteDelta::new(0, -1, -1));
        assert!(!counters.is_consistent());
    }

    #[test]
    fn test_drifted_total_is_inconsistent() {
        assert!(!VoteCounters::new(2, 2, 5).is_consistent());
        assert!(VoteCounters::default().is_consistent());
    }
}
