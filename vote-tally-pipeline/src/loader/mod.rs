//! This module defines the `VoteCounterLoader` responsible for applying vote
//! transitions to the counters of a votable target and persisting the
//! recomputed success rate.
//! It is written once and instantiated per entity family through the
//! `VotableTargetRepository` it is built with.
pub use crate::errors::LoaderError;
use crate::errors::ProcessorError;
use crate::processor::{resolve_delta, success_rate_for};
use tracing::debug;
use vote_tally_repository::VotableTargetRepository;
use vote_tally_shared::types::{TargetKind, VoteOperation, VoteOutcome};

/// `VoteCounterLoader` keeps a target's counters and success rate in step
/// with its votes.
///
/// Each call runs on the caller's transaction: it never begins, commits or
/// rolls back on its own. On error the caller must roll back.
pub struct VoteCounterLoader<R: VotableTargetRepository> {
    repository: R,
}

impl<R: VotableTargetRepository> VoteCounterLoader<R> {
    /// Creates a new `VoteCounterLoader` instance.
    ///
    /// # Arguments
    ///
    /// * `repository` - Storage for the entity family this loader updates
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The entity family this loader updates.
    pub fn kind(&self) -> TargetKind {
        self.repository.kind()
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Applies a vote transition given by operation name.
    ///
    /// # Arguments
    ///
    /// * `conn` - Caller's open transaction
    /// * `target_id` - Target the vote belongs to
    /// * `operation` - `create`, `update` or `delete`
    /// * `new_value` - Vote value after the transition (`true` is an upvote)
    /// * `old_value` - Vote value before the transition
    ///
    /// # Returns
    ///
    /// * `Ok(VoteOutcome::Unchanged)` - The transition changes nothing; storage untouched
    /// * `Ok(VoteOutcome::Updated { .. })` - Counters and success rate written
    /// * `Err(LoaderError)` - Validation or storage failure
    pub async fn apply_vote_delta(
        &self,
        conn: &mut R::Connection,
        target_id: &str,
        operation: &str,
        new_value: Option<bool>,
        old_value: Option<bool>,
    ) -> Result<VoteOutcome, LoaderError> {
        let operation: VoteOperation = operation.parse().map_err(ProcessorError::from)?;
        self.apply_operation(conn, target_id, operation, new_value, old_value)
            .await
    }

    /// Applies a typed vote transition.
    ///
    /// Resolves the deltas, increments the counters in storage, scores the
    /// counters returned by the increment and writes the score back.
    pub async fn apply_operation(
        &self,
        conn: &mut R::Connection,
        target_id: &str,
        operation: VoteOperation,
        new_value: Option<bool>,
        old_value: Option<bool>,
    ) -> Result<VoteOutcome, LoaderError> {
        let delta = resolve_delta(operation, new_value, old_value)?;
        if delta.is_zero() {
            debug!(kind = %self.kind(), target_id, %operation, "Vote transition is a no-op");
            return Ok(VoteOutcome::Unchanged);
        }

        let counters = self
            .repository
            .increment_counters(conn, target_id, &delta)
            .await?;
        if !counters.is_consistent() {
            return Err(LoaderError::CounterInvariant {
                target_id: target_id.to_string(),
                details: format!(
                    "upvotes={} downvotes={} votes={}",
                    counters.upvote_count, counters.downvote_count, counters.vote_count
                ),
            });
        }

        let success_rate = success_rate_for(&counters);
        self.repository
            .set_success_rate(conn, target_id, success_rate)
            .await?;

        debug!(
            kind = %self.kind(),
            target_id,
            %operation,
            upvotes = counters.upvote_count,
            downvotes = counters.downvote_count,
            votes = counters.vote_count,
            success_rate,
            "Applied vote delta"
        );
        Ok(VoteOutcome::Updated {
            counters,
            success_rate,
        })
    }
}
