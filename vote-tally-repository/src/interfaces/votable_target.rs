//! This module defines the `VotableTargetRepository` trait, the storage capability
//! the counter orchestration is generic over. One implementation is instantiated
//! per entity family.
use vote_tally_shared::types::{TargetCounters, TargetKind, VoteCounters, VoteDelta};
use crate::errors::VotesRepositoryError;

/// A trait that defines the interface for mutating the vote aggregates of a
/// family of votable targets.
///
/// Every method runs against a caller-supplied connection so that the counter
/// increment and the success rate write land in the same transaction. The
/// caller owns that transaction and decides when to commit or roll back.
#[async_trait::async_trait]
pub trait VotableTargetRepository: Send + Sync {
    /// Transactional handle the repository operates on.
    type Connection: Send;

    /// The entity family this repository addresses.
    fn kind(&self) -> TargetKind;

    /// Atomically adds `delta` to the counters of `target_id`.
    ///
    /// The increment is performed by the storage layer, not as a
    /// read-modify-write in application code, and the resulting counters are
    /// returned from the same operation.
    ///
    /// # Arguments
    ///
    /// * `conn` - Active transaction context
    /// * `target_id` - Identifier of an existing target row
    /// * `delta` - Counter adjustments to apply
    ///
    /// # Returns
    ///
    /// * `Ok(VoteCounters)` - The counters after the increment
    /// * `Err(VotesRepositoryError::TargetNotFound)` - No row has this id
    /// * `Err(VotesRepositoryError)` - Any other storage failure
    async fn increment_counters(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        delta: &VoteDelta,
    ) -> Result<VoteCounters, VotesRepositoryError>;

    /// Persists the success rate of `target_id`.
    async fn set_success_rate(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        success_rate: f64,
    ) -> Result<(), VotesRepositoryError>;

    /// Reads up to `limit` target rows ordered by id, starting after `after`.
    ///
    /// Used to walk a whole family page by page without holding a single
    /// long-running transaction. Implementations lock the returned rows for
    /// the rest of the caller's transaction so scores written from them
    /// cannot go stale.
    async fn fetch_counters_page(
        &self,
        conn: &mut Self::Connection,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TargetCounters>, VotesRepositoryError>;
}
