//! Horizon configuration module.
//!
//! Configuration is loaded from environment variables with fallback to defaults.
//!
//! | Variable                     | Default        |
//! |------------------------------|----------------|
//! | `HORIZON_DATABASE_PATH`      | `./horizon.db` |
//! | `HORIZON_DB_MAX_CONNECTIONS` | `5`            |
//! | `HORIZON_STATUS_POLICY`      | `permissive`   |
//! | `HORIZON_LOG`                | `info`         |

use horizon_core::TransitionPolicy;
use horizon_db::DbConfig;
use serde::{Deserialize, Serialize};
use std::env;

pub const DATABASE_PATH_VAR: &str = "HORIZON_DATABASE_PATH";
pub const DB_MAX_CONNECTIONS_VAR: &str = "HORIZON_DB_MAX_CONNECTIONS";
pub const STATUS_POLICY_VAR: &str = "HORIZON_STATUS_POLICY";
pub const LOG_VAR: &str = "HORIZON_LOG";

/// Horizon configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HorizonConfig {
    /// SQLite database file
    pub database_path: String,

    /// Pool size upper bound
    pub db_max_connections: u32,

    /// How `set_booking_status` treats moves outside the state machine
    pub status_policy: TransitionPolicy,

    /// `EnvFilter` directive for the tracing subscriber
    pub log_filter: String,
}

impl Default for HorizonConfig {
    fn default() -> Self {
        HorizonConfig {
            database_path: "./horizon.db".to_string(),
            db_max_connections: 5,
            status_policy: TransitionPolicy::Permissive,
            log_filter: "info".to_string(),
        }
    }
}

impl HorizonConfig {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup (the process environment in
    /// production, a map in tests).
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = HorizonConfig::default();

        let config = HorizonConfig {
            database_path: lookup(DATABASE_PATH_VAR).unwrap_or(defaults.database_path),

            db_max_connections: match lookup(DB_MAX_CONNECTIONS_VAR) {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(DB_MAX_CONNECTIONS_VAR.to_string()))?,
                None => defaults.db_max_connections,
            },

            status_policy: match lookup(STATUS_POLICY_VAR) {
                Some(raw) => raw
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(STATUS_POLICY_VAR.to_string()))?,
                None => defaults.status_policy,
            },

            log_filter: lookup(LOG_VAR).unwrap_or(defaults.log_filter),
        };

        if config.database_path.trim().is_empty() {
            return Err(ConfigError::MissingRequired(DATABASE_PATH_VAR.to_string()));
        }

        // The pool keeps one connection open at all times
        if config.db_max_connections == 0 {
            return Err(ConfigError::InvalidValue(DB_MAX_CONNECTIONS_VAR.to_string()));
        }

        Ok(config)
    }

    /// Pool settings derived from this configuration.
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(&self.database_path).max_connections(self.db_max_connections)
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Missing required configuration: {0}")]
    MissingRequired(String),
}
