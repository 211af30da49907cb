use dotenv::dotenv;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use vote_tally::{Dependencies, LogFormat, TallyConfig, TallyError};
use vote_tally_shared::types::TargetKind;

/// Main entry point for the Vote Tally application.
///
/// Loads the configuration, connects to PostgreSQL, waits for the votable
/// target tables and rescores every family so stored success rates match
/// the current counters.
///
/// # Returns
///
/// A `Result` indicating success or a `TallyError` if an error occurs
/// during initialization or rescoring.
#[tokio::main]
async fn main() -> Result<(), TallyError> {
    dotenv().ok();

    let config = TallyConfig::from_env()?;
    init_tracing(config.log_format)?;

    let dependencies = Dependencies::with_config(config).await?;
    dependencies.wait_for_schema().await?;

    for kind in TargetKind::ALL {
        match dependencies.tally.rescore(kind).await {
            Ok(summary) => info!(
                %kind,
                scanned = summary.scanned,
                updated = summary.updated,
                skipped = summary.skipped,
                "Family rescored"
            ),
            Err(e) => {
                error!(%kind, error = %e, "Rescore failed");
                return Err(e);
            }
        }
    }

    Ok(())
}

fn init_tracing(log_format: LogFormat) -> Result<(), TallyError> {
    let registry = tracing_subscriber::registry().with(
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "vote_tally=info,vote_tally_pipeline=info".into()),
    );

    let result = match log_format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .json(),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init(),
    };
    result.map_err(|e| TallyError::config(format!("Failed to initialize tracing: {e}")))?;

    info!(
        service_name = "vote-tally",
        service_version = env!("CARGO_PKG_VERSION"),
        ?log_format,
        "Tracing initialized"
    );
    Ok(())
}
