use std::str::FromStr;
use crate::errors::TallyError;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_RESCORE_BATCH_SIZE: usize = 500;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human readable console output.
    #[default]
    Pretty,
    /// One JSON object per event, for log shippers.
    Json,
}

impl FromStr for LogFormat {
    type Err = TallyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(TallyError::config(format!(
                "LOG_FORMAT must be `pretty` or `json`, got `{other}`"
            ))),
        }
    }
}

/// Application settings read from the environment.
///
/// | variable | default |
/// |---|---|
/// | `DATABASE_URL` | required |
/// | `DATABASE_MAX_CONNECTIONS` | 5 |
/// | `RESCORE_BATCH_SIZE` | 500 |
/// | `RUN_MIGRATIONS` | false |
/// | `LOG_FORMAT` | pretty |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TallyConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub rescore_batch_size: usize,
    pub run_migrations: bool,
    pub log_format: LogFormat,
}

impl TallyConfig {
    /// Reads the configuration from process environment variables.
    pub fn from_env() -> Result<Self, TallyError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads the configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, TallyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|url| !url.trim().is_empty())
            .ok_or_else(|| TallyError::config("DATABASE_URL must be set"))?;

        let max_connections =
            parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
        if max_connections == 0 {
            return Err(TallyError::config("DATABASE_MAX_CONNECTIONS must be greater than 0"));
        }

        let rescore_batch_size =
            parse_or(&lookup, "RESCORE_BATCH_SIZE", DEFAULT_RESCORE_BATCH_SIZE)?;
        if rescore_batch_size == 0 {
            return Err(TallyError::config("RESCORE_BATCH_SIZE must be greater than 0"));
        }

        let run_migrations = match lookup("RUN_MIGRATIONS") {
            Some(value) => parse_bool("RUN_MIGRATIONS", &value)?,
            None => false,
        };

        let log_format = match lookup("LOG_FORMAT") {
            Some(value) => value.parse()?,
            None => LogFormat::default(),
        };

        Ok(Self {
            database_url,
            max_connections,
            rescore_batch_size,
            run_migrations,
            log_format,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, TallyError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e| TallyError::config(format!("{key} is invalid: {e}"))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, TallyError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(TallyError::config(format!("{key} must be a boolean, got `{other}`"))),
    }
}
