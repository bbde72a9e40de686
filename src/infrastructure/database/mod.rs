pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use std::time::Duration;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DatabaseSettings;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./garage.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    /// Upper bound for acquiring a pooled connection
    pub acquire_timeout: Duration,
    /// How long a statement waits on a locked database before failing
    /// (SQLite `busy_timeout`)
    pub command_timeout: Duration,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./garage.db?mode=rwc".to_string(),
            max_connections: 10,
            acquire_timeout: Duration::from_secs(120),
            command_timeout: Duration::from_secs(120),
        }
    }
}

impl DatabaseConfig {
    /// Create config for SQLite
    pub fn sqlite(path: &str) -> Self {
        Self {
            url: format!("sqlite://{}?mode=rwc", path),
            ..Self::default()
        }
    }

    /// Private in-memory database; a single connection keeps every query on it
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }
}

impl From<&DatabaseSettings> for DatabaseConfig {
    fn from(settings: &DatabaseSettings) -> Self {
        Self {
            url: settings.url.clone(),
            max_connections: settings.max_connections.max(1),
            acquire_timeout: Duration::from_secs(settings.command_timeout_secs),
            command_timeout: Duration::from_secs(settings.command_timeout_secs),
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);

    let command_timeout = config.command_timeout;
    let mut opts = ConnectOptions::new(config.url.clone());
    opts.max_connections(config.max_connections)
        .min_connections(1)
        .acquire_timeout(config.acquire_timeout)
        .sqlx_logging(false)
        .map_sqlx_sqlite_opts(move |sqlite| sqlite.busy_timeout(command_timeout));

    let db = Database::connect(opts).await?;
    info!("Database connected successfully");
    Ok(db)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseSettings;

    #[test]
    fn settings_drive_both_timeouts() {
        let settings = DatabaseSettings {
            command_timeout_secs: 7,
            max_connections: 0,
            ..DatabaseSettings::default()
        };
        let config = DatabaseConfig::from(&settings);
        assert_eq!(config.command_timeout, Duration::from_secs(7));
        assert_eq!(config.acquire_timeout, Duration::from_secs(7));
        assert_eq!(config.max_connections, 1);
    }

    #[test]
    fn file_database_url() {
        let config = DatabaseConfig::sqlite("/tmp/garage.db");
        assert_eq!(config.url, "sqlite:///tmp/garage.db?mode=rwc");
        assert_eq!(config.max_connections, 10);
    }
}
