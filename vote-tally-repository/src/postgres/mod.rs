//! PostgreSQL implementation of the votes repository.
//!
//! Counters live on the `listings` and `pc_listings` tables. Increments are
//! issued as `UPDATE ... RETURNING` so the database performs the addition and
//! hands back the new values in the same round-trip. The row lock taken by
//! that statement is held until the caller's transaction ends, so the success
//! rate written afterwards always matches the counters it was computed from.
//!
//! ## Database Tables
//!
//! - `listings`: mobile listings with `upvote_count`, `downvote_count`, `vote_count`, `success_rate`
//! - `pc_listings`: PC listings with the same aggregate columns
use async_trait::async_trait;
use sqlx::Row;
use sqlx::migrate::Migrator;
use tracing::warn;
use uuid::Uuid;
use vote_tally_shared::types::{TargetCounters, TargetKind, VoteCounters, VoteDelta};
use crate::{VotableTargetRepository, VotesRepositoryError};

/// Embedded schema migrations for the votable target tables.
pub static MIGRATOR: Migrator = sqlx::migrate!("src/postgres/migrations");

/// PostgreSQL implementation of `VotableTargetRepository`.
///
/// One instance addresses one entity family; the table is selected from the
/// `TargetKind` it was built with. The repository holds no pool: every
/// operation runs on the connection of the caller's transaction.
#[derive(Debug, Clone, Copy)]
pub struct PostgresVotableRepository {
    kind: TargetKind,
}

impl PostgresVotableRepository {
    /// Creates a repository for the given entity family.
    pub fn new(kind: TargetKind) -> Self {
        Self { kind }
    }

    /// Repository for mobile listings.
    pub fn listings() -> Self {
        Self::new(TargetKind::Listing)
    }

    /// Repository for PC listings.
    pub fn pc_listings() -> Self {
        Self::new(TargetKind::PcListing)
    }

    fn parse_target_id(target_id: &str) -> Result<Uuid, VotesRepositoryError> {
        Uuid::parse_str(target_id)
            .map_err(|e| VotesRepositoryError::InvalidTargetId(format!("{target_id}: {e}")))
    }

    fn counters_from_row(row: &sqlx::postgres::PgRow) -> Result<VoteCounters, VotesRepositoryError> {
        Ok(VoteCounters {
            upvote_count: row.try_get("upvote_count")?,
            downvote_count: row.try_get("downvote_count")?,
            vote_count: row.try_get("vote_count")?,
        })
    }
}

#[async_trait]
impl VotableTargetRepository for PostgresVotableRepository {
    type Connection = sqlx::PgConnection;

    fn kind(&self) -> TargetKind {
        self.kind
    }

    /// Increments the three counters in a single statement and returns the
    /// updated values.
    ///
    /// # Arguments
    ///
    /// * `conn` - Connection of the caller's open transaction
    /// * `target_id` - UUID of the target row
    /// * `delta` - Counter adjustments to apply
    ///
    /// # Returns
    ///
    /// * `Ok(VoteCounters)` - Counters as stored after the increment
    /// * `Err(VotesRepositoryError)` - Invalid id, missing row or database error
    async fn increment_counters(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        delta: &VoteDelta,
    ) -> Result<VoteCounters, VotesRepositoryError> {
        let id = Self::parse_target_id(target_id)?;
        let sql = format!(
            r#"
            UPDATE {}
            SET upvote_count = upvote_count + $2,
                downvote_count = downvote_count + $3,
                vote_count = vote_count + $4
            WHERE id = $1
            RETURNING upvote_count, downvote_count, vote_count
            "#,
            self.kind.table_name()
        );

        let row = sqlx::query(&sql)
            .bind(id)
            .bind(delta.upvotes)
            .bind(delta.downvotes)
            .bind(delta.vote_count)
            .fetch_optional(&mut *conn)
            .await?;

        match row {
            Some(row) => Self::counters_from_row(&row),
            None => {
                warn!(kind = %self.kind, target_id, "Vote target not found while incrementing counters");
                Err(VotesRepositoryError::target_not_found(self.kind, target_id))
            }
        }
    }

    async fn set_success_rate(
        &self,
        conn: &mut Self::Connection,
        target_id: &str,
        success_rate: f64,
    ) -> Result<(), VotesRepositoryError> {
        let id = Self::parse_target_id(target_id)?;
        let sql = format!(
            "UPDATE {} SET success_rate = $2 WHERE id = $1",
            self.kind.table_name()
        );

        let result = sqlx::query(&sql)
            .bind(id)
            .bind(success_rate)
            .execute(&mut *conn)
            .await?;

        if result.rows_affected() == 0 {
            warn!(kind = %self.kind, target_id, "Vote target not found while writing success rate");
            return Err(VotesRepositoryError::target_not_found(self.kind, target_id));
        }
        Ok(())
    }

    /// Keyset-paginated scan over the family's table.
    ///
    /// The returned rows stay locked until the caller's transaction ends, so
    /// a concurrent vote cannot change the counters a rescore is scoring.
    /// A vote already holding a row makes the scan wait for it and then see
    /// its committed counters.
    ///
    /// # Arguments
    ///
    /// * `conn` - Active connection or transaction
    /// * `after` - Last id of the previous page, `None` for the first page
    /// * `limit` - Maximum number of rows to return
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<TargetCounters>)` - Rows ordered by id (empty when exhausted)
    /// * `Err(VotesRepositoryError)` - Database query failure
    async fn fetch_counters_page(
        &self,
        conn: &mut Self::Connection,
        after: Option<&str>,
        limit: usize,
    ) -> Result<Vec<TargetCounters>, VotesRepositoryError> {
        let after = after.map(Self::parse_target_id).transpose()?;
        let sql = format!(
            r#"
            SELECT id, upvote_count, downvote_count, vote_count, success_rate
            FROM {}
            WHERE ($1::uuid IS NULL OR id > $1)
            ORDER BY id
            LIMIT $2
            FOR UPDATE
            "#,
            self.kind.table_name()
        );

        let rows = sqlx::query(&sql)
            .bind(after)
            .bind(i64::try_from(limit).unwrap_or(i64::MAX))
            .fetch_all(&mut *conn)
            .await?;

        let mut result = Vec::with_capacity(rows.len());
        for row in rows {
            let id: Uuid = row.try_get("id")?;
            result.push(TargetCounters {
                target_id: id.to_string(),
                counters: Self::counters_from_row(&row)?,
                success_rate: row.try_get("success_rate")?,
            });
        }
        Ok(result)
    }
}

/// Checks if the votable target tables are created in the database.
///
/// # Returns
///
/// * `Ok(true)` - If every family's table exists
/// * `Ok(false)` - If at least one table is missing
pub async fn check_tables_created(pool: &sqlx::PgPool) -> Result<bool, VotesRepositoryError> {
    for kind in TargetKind::ALL {
        let table_exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM information_schema.tables WHERE table_schema = current_schema() AND table_name = $1)",
        )
        .bind(kind.table_name())
        .fetch_one(pool)
        .await?;
        if !table_exists {
            return Ok(false);
        }
    }
    Ok(true)
}
