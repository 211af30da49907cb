//! In-memory implementation of the votes repository.
//!
//! The store keeps every family's rows in a single ordered map behind an
//! async mutex. A transaction holds the lock for its whole lifetime and works
//! on a staged copy of the rows: `commit` publishes the copy, dropping the
//! transaction discards it. Transactions are therefore fully serialized.
use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, OwnedMutexGuard};
use vote_tally_shared::types::{TargetCounters, TargetKind, VoteCounters, VoteDelta};
use crate::{VotableTargetRepository, VotesRepositoryError};

/// Neutral score stored on targets that have never been voted on.
const INITIAL_SUCCESS_RATE: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
struct StoredTarget {
    counters: VoteCounters,
    success_rate: f64,
}

type Rows = BTreeMap<(TargetKind, String), StoredTarget>;

/// Shared in-process storage for listings and PC listings.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVoteStore {
    rows: Arc<Mutex<Rows>>,
}

impl InMemoryVoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a target with zeroed counters and the neutral success rate.
    pub async fn insert_target(&self, kind: TargetKind, target_id: impl Into<String>) {
        self.insert_target_with(kind, target_id, VoteCounters::default(), INITIAL_SUCCESS_RATE)
            .await;
    }

    /// Inserts a target with explicit counters and success rate.
    pub async fn insert_target_with(
        &self,
        kind: TargetKind,
        target_id: impl Into<String>,
        counters: VoteCounters,
        success_rate: f64,
    ) {
        self.rows.lock().await.insert(
            (kind, target_id.into()),
            StoredTarget {
                counters,
                success_rate,
            },
        );
    }

    /// Returns the committed state of a target.
    pub async fn get(&self, kind: TargetKind, target_id: &str) -> Option<TargetCounters> {
        self.rows
            .lock()
            .await
            .get(&(kind, target_id.to_string()))
            .map(|stored| TargetCounters {
                target_id: target_id.to_string(),
                counters: stored.counters,
                success_rate: stored.success_rate,
            })
    }

    /// Begins a transaction, waiting for any other open transaction to finish.
    pub async fn begin(&self) -> InMemoryTransaction {
        let guard = self.rows.clone().lock_owned().await;
        let staged = guard.clone();
        InMemoryTransaction {
            guard,
            staged,
            writes: 0,
        }
    }
}

/// An open transaction on an `InMemoryVoteStore`.
pub struct InMemoryTransaction {
    guard: OwnedMutexGuard<Rows>,
    staged: Rows,
    writes: usize,
}

impl InMemoryTransaction {
    /// Number of write operations issued through this transaction.
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Publishes the staged rows and releases the store.
    pub fn commit(mut self) {
        *self.guard = std::mem::take(&mut self.staged);
    }

    fn row_mut(
        &mut self,
        kind: TargetKind,
        target_id: &str,
    ) -> Result<&mut StoredTarget, VotesRepositoryError> {
        self.staged
            .get_mut(&(kind, target_id.to_string()))
            .ok_or_else(|| VotesRepositoryError::target_not_found(kind, target_id))
    }
}

/// In-memory implementation of `VotableTargetRepository` for one entity family.
#[derive(Debug, Clone, Copy)]
pub struct InMemoryVotableRepository {
    kind: TargetKind,
}

impl InMemoryVotableRepository {
    pub fn new(kind: TargetKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl VotableTargetRepository for InMemoryVotableRepository {
    type Connection = InMemoryTransaction;

    fn kind(&self) -> TargetKind {
        self.kind
    }

    async fn increment_counters(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        delta: &VoteDelta,
    ) -> Result<VoteCounters, VotesRepositoryError> {
        conn.writes += 1;
        let row = conn.row_mut(self.kind, target_id)?;
        row.counters = row.counters.apply(delta);
        Ok(row.counters)
    }

    async fn set_success_rate(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        success_rate: f64,
    ) -> Result<(), VotesRepositoryError> {
        conn.writes += 1;
        conn.row_mut(self.kind, target_id)?.success_rate = success_rate;
        Ok(())
    }

    async fn fetch_counters_page(
        &self,
        conn: &mut Self::Connection,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TargetCounters>, VotesRepositoryError> {
        Ok(conn
            .staged
            .iter()
            .filter(|((kind, id), _)| *kind == self.kind && after.is_none_or(|a| id.as_str() > a))
            .take(limit)
            .map(|((_, id), stored)| TargetCounters {
                target_id: id.clone(),
                counters: stored.counters,
                success_rate: stored.success_rate,
            })
            .collect())
    }
}
