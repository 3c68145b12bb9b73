//! Service configuration

use brivo_client::BrivoConfig;
use brivo_client::config::{DEFAULT_API_URL, DEFAULT_AUTH_URL};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Which [`Store`](crate::db::Store) backs the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Postgres,
    Memory,
}

impl StoreKind {
    fn parse(value: &str) -> Result<Self, BoxError> {
        match value {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(format!("STORE must be postgres or memory, got {other}").into()),
        }
    }
}

/// Club sync configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection URL (unused with `STORE=memory`)
    pub database_url: Option<String>,
    /// HTTP port for the host application
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    pub store: StoreKind,
    /// Seconds between group reconciliation runs
    pub group_sync_interval_secs: u64,
    pub brivo: BrivoConfig,
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_or<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Reconciliation interval in seconds; zero would spin the scheduler
    fn parse_sync_interval(value: Option<String>) -> Result<u64, BoxError> {
        let secs = value.and_then(|v| v.parse().ok()).unwrap_or(3600);
        if secs == 0 {
            return Err("GROUP_SYNC_INTERVAL_SECS must be greater than zero".into());
        }
        Ok(secs)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());
        let store = StoreKind::parse(
            &std::env::var("STORE").unwrap_or_else(|_| "postgres".into()),
        )?;

        let database_url = std::env::var("DATABASE_URL").ok().filter(|s| !s.is_empty());
        if store == StoreKind::Postgres && database_url.is_none() {
            return Err("DATABASE_URL must be set".into());
        }

        let brivo = BrivoConfig::new(
            Self::require_secret("BRIVO_CLIENT_ID", &environment)?,
            Self::require_secret("BRIVO_CLIENT_SECRET", &environment)?,
            Self::require_secret("BRIVO_USERNAME", &environment)?,
            Self::require_secret("BRIVO_PASSWORD", &environment)?,
            Self::require_secret("BRIVO_API_KEY", &environment)?,
        )
        .with_hosts(
            std::env::var("BRIVO_AUTH_URL").unwrap_or_else(|_| DEFAULT_AUTH_URL.into()),
            std::env::var("BRIVO_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into()),
        )
        .with_timeout(Self::parse_or("BRIVO_TIMEOUT_SECS", 30));

        Ok(Self {
            database_url,
            http_port: Self::parse_or("HTTP_PORT", 8080),
            environment,
            store,
            group_sync_interval_secs: Self::parse_sync_interval(
                std::env::var("GROUP_SYNC_INTERVAL_SECS").ok(),
            )?,
            brivo,
        })
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}
