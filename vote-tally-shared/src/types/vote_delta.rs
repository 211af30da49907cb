use serde::{Deserialize, Serialize};

/// Signed adjustments applied to a target's counters for one vote transition.
///
/// Every component is in `{-1, 0, 1}` and `vote_count == upvotes + downvotes`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteDelta {
    pub upvotes: i64,
    pub downvotes: i64,
    pub vote_count: i64,
}

impl VoteDelta {
    pub const ZERO: VoteDelta = VoteDelta {
        upvotes: 0,
        downvotes: 0,
        vote_count: 0,
    };

    pub fn new(upvotes: i64, downvotes: i64, vote_count: i64) -> Self {
        Self {
            upvotes,
            downvotes,
            vote_count,
        }
    }

    /// Returns `true` when applying this delta would not change any counter.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }
}
