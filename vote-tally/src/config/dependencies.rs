use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tracing::info;
use vote_tally_repository::{MIGRATOR, VotesRepositoryError, check_tables_created};
use crate::config::TallyConfig;
use crate::errors::TallyError;
use crate::tally::VoteTally;

const SCHEMA_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// `Dependencies` holds the components the vote tally runs on.
///
/// It includes the loaded configuration, the PostgreSQL pool and the
/// `VoteTally` facade built on top of that pool.
pub struct Dependencies {
    pub config: TallyConfig,
    pub pool: PgPool,
    pub tally: VoteTally,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance from environment variables.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `TallyError` if the configuration is invalid or the database is
    /// unreachable.
    pub async fn new() -> Result<Self, TallyError> {
        Self::with_config(TallyConfig::from_env()?).await
    }

    /// Connects to the database described by `config` and wires the tally.
    ///
    /// Applies the embedded migrations first when `run_migrations` is set.
    pub async fn with_config(config: TallyConfig) -> Result<Self, TallyError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;

        if config.run_migrations {
            info!("Running database migrations");
            MIGRATOR
                .run(&pool)
                .await
                .map_err(VotesRepositoryError::from)?;
        }

        let tally = VoteTally::new(pool.clone(), config.rescore_batch_size);

        Ok(Dependencies { config, pool, tally })
    }

    /// Blocks until the votable target tables exist.
    pub async fn wait_for_schema(&self) -> Result<(), TallyError> {
        while !check_tables_created(&self.pool).await? {
            info!(
                "Waiting for votable target tables, retrying in {} seconds",
                SCHEMA_POLL_INTERVAL.as_secs()
            );
            tokio::time::sleep(SCHEMA_POLL_INTERVAL).await;
        }
        Ok(())
    }
}
