//! Recomputes stored success rates from stored counters.
//!
//! The job walks a family page by page. Each page runs on a connection the
//! caller provides, so the caller decides the transaction boundaries.
use crate::errors::RescoreError;
use crate::processor::success_rate_for;
use tracing::warn;
use vote_tally_repository::VotableTargetRepository;

/// Outcome of rescoring one page of targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RescorePage {
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Id of the last scanned target, the cursor for the next page.
    pub last_target_id: Option<String>,
}

impl RescorePage {
    /// `true` once the scan has run past the last row.
    pub fn is_last(&self, limit: usize) -> bool {
        self.scanned < limit
    }
}

/// Running totals over a whole rescore job.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RescoreSummary {
    pub scanned: usize,
    pub updated: usize,
    pub skipped: usize,
}

impl RescoreSummary {
    pub fn absorb(&mut self, page: &RescorePage) {
        self.scanned += page.scanned;
        self.updated += page.updated;
        self.skipped += page.skipped;
    }
}

/// Rescores up to `limit` targets after `after`.
///
/// Only rows whose stored success rate differs from the recomputed one are
/// written. Rows with inconsistent counters are logged and left untouched.
///
/// # Arguments
///
/// * `repository` - Storage for the family being rescored
/// * `conn` - Connection or transaction to read and write through
/// * `after` - Cursor returned by the previous page, `None` to start
/// * `limit` - Page size
pub async fn rescore_page<R: VotableTargetRepository>(
    repository: &R,
    conn: &mut R::Connection,
    after: Option<&str>,
    limit: usize,
) -> Result<RescorePage, RescoreError> {
    let targets = repository.fetch_counters_page(conn, after, limit).await?;

    let mut page = RescorePage {
        scanned: targets.len(),
        last_target_id: targets.last().map(|t| t.target_id.clone()),
        ..RescorePage::default()
    };

    for target in &targets {
        if !target.counters.is_consistent() {
            warn!(
                kind = %repository.kind(),
                target_id = %target.target_id,
                upvotes = target.counters.upvote_count,
                downvotes = target.counters.downvote_count,
                votes = target.counters.vote_count,
                "Skipping target with inconsistent counters"
            );
            page.skipped += 1;
            continue;
        }

        let success_rate = success_rate_for(&target.counters);
        if success_rate.to_bits() != target.success_rate.to_bits() {
            repository
                .set_success_rate(conn, &target.target_id, success_rate)
                .await?;
            page.updated += 1;
        }
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processor::success_rate;
    use vote_tally_repository::{InMemoryVotableRepository, InMemoryVoteStore};
    use vote_tally_shared::types::{TargetKind, VoteCounters};

    async fn seeded_store() -> InMemoryVoteStore {
        let store = InMemoryVoteStore::new();
        // correct score
        store
            .insert_target_with(
                TargetKind::Listing,
                "a",
                VoteCounters::new(3, 1, 4),
                success_rate(3, 1),
            )
            .await;
        // stale score
        store
            .insert_target_with(TargetKind::Listing, "b", VoteCounters::new(10, 0, 10), 0.5)
            .await;
        // drifted total
        store
            .insert_target_with(TargetKind::Listing, "c", VoteCounters::new(1, 1, 3), 0.5)
            .await;
        // stale, never voted
        store
            .insert_target_with(TargetKind::Listing, "d", VoteCounters::default(), 0.9)
            .await;
        store
            .insert_target_with(TargetKind::PcListing, "e", VoteCounters::new(1, 0, 1), 0.0)
            .await;
        store
    }

    #[tokio::test]
    async fn test_rescore_whole_family() {
        let store = seeded_store().await;
        let repository = InMemoryVotableRepository::new(TargetKind::Listing);

        let mut summary = RescoreSummary::default();
        let mut after: Option<String> = None;
        loop {
            let mut tx = store.begin().await;
            let page = rescore_page(&repository, &mut tx, after.as_deref(), 2)
                .await
                .unwrap();
            tx.commit();
            summary.absorb(&page);
            if page.is_last(2) {
                break;
            }
            after = page.last_target_id;
        }

        assert_eq!(
            summary,
            RescoreSummary {
                scanned: 4,
                updated: 2,
                skipped: 1
            }
        );
        let b = store.get(TargetKind::Listing, "b").await.unwrap();
        assert_eq!(b.success_rate, success_rate(10, 0));
        let c = store.get(TargetKind::Listing, "c").await.unwrap();
        assert_eq!(c.success_rate, 0.5);
        let d = store.get(TargetKind::Listing, "d").await.unwrap();
        assert_eq!(d.success_rate, 0.5);
        let e = store.get(TargetKind::PcListing, "e").await.unwrap();
        assert_eq!(e.success_rate, 0.0);
    }

    #[tokio::test]
    async fn test_rescore_is_idempotent() {
        let store = seeded_store().await;
        let repository = InMemoryVotableRepository::new(TargetKind::PcListing);

        let mut tx = store.begin().await;
        let first = rescore_page(&repository, &mut tx, None, 10).await.unwrap();
        tx.commit();
        assert_eq!(first.updated, 1);

        let mut tx = store.begin().await;
        let second = rescore_page(&repository, &mut tx, None, 10).await.unwrap();
        assert_eq!(second.scanned, 1);
        assert_eq!(second.updated, 0);
        assert_eq!(tx.writes(), 0);
    }

    #[tokio::test]
    async fn test_empty_page() {
        let store = InMemoryVoteStore::new();
        let repository = InMemoryVotableRepository::new(TargetKind::Listing);

        let mut tx = store.begin().await;
        let page = rescore_page(&repository, &mut tx, None, 10).await.unwrap();
        assert_eq!(page, RescorePage::default());
        assert!(page.is_last(10));
    }
}
