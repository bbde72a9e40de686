//! Application configuration
//!
//! Loaded from a TOML file (`~/.config/garage-service/config.toml` by default,
//! overridable with `GARAGE_CONFIG`). Every section and field has a default so
//! a partial file is valid.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Default location of the configuration file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("garage-service")
        .join("config.toml")
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub logging: LoggingConfig,
    pub booking: BookingConfig,
    pub notifications: NotificationConfig,
    pub transfers: TransferConfig,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// `DATABASE_URL` in the environment overrides `database.url`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut cfg = Self::from_toml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    pub fn from_toml(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(raw)
    }

    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            if !url.is_empty() {
                self.database.url = url;
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub api_host: String,
    pub api_port: u16,
    /// Graceful shutdown timeout in seconds
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_host: "0.0.0.0".to_string(),
            api_port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    /// Database URL (e.g., "sqlite://./garage.db?mode=rwc")
    pub url: String,
    pub max_connections: u32,
    /// Bound on acquiring a connection and on waiting for a locked database, in seconds
    pub command_timeout_secs: u64,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: "sqlite://./garage.db?mode=rwc".to_string(),
            max_connections: 10,
            command_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingConfig {
    /// Capacity used when neither the center nor the date has an explicit limit
    pub default_daily_limit: i32,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            default_daily_limit: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub scan_interval_secs: u64,
    /// Delay before the next scan after a failed one
    pub retry_backoff_secs: u64,
    pub dedup_window_hours: i64,
    pub run_timeout_secs: u64,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            scan_interval_secs: 3600,
            retry_backoff_secs: 300,
            dedup_window_hours: 24,
            run_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransferConfig {
    pub expiry_check_interval_secs: u64,
    /// Lifetime of a pending transfer request
    pub default_ttl_hours: i64,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            expiry_check_interval_secs: 600,
            default_ttl_hours: 72,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = AppConfig::from_toml("").unwrap();
        assert_eq!(cfg.server.api_port, 8080);
        assert_eq!(cfg.booking.default_daily_limit, 10);
        assert_eq!(cfg.notifications.scan_interval_secs, 3600);
        assert_eq!(cfg.notifications.retry_backoff_secs, 300);
        assert_eq!(cfg.notifications.dedup_window_hours, 24);
        assert_eq!(cfg.database.command_timeout_secs, 120);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = AppConfig::from_toml(
            r#"
            [server]
            api_port = 9090

            [booking]
            default_daily_limit = 4
            "#,
        )
        .unwrap();
        assert_eq!(cfg.server.api_port, 9090);
        assert_eq!(cfg.server.api_host, "0.0.0.0");
        assert_eq!(cfg.booking.default_daily_limit, 4);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        assert!(AppConfig::from_toml("[server\napi_port = ").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::load(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
