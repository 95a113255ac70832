//! # Application State
//!
//! Everything a command needs, behind one cheap-to-clone handle.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    AppState                                             │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────────────┐  ┌──────────────────┐  │
//! │  │   Database   │  │ BookingManager<          │  │  HorizonConfig   │  │
//! │  │  (SQLite     │──►   SqliteBookingStore>    │  │  (read-only)     │  │
//! │  │   pool)      │  │  + TransitionPolicy      │  │                  │  │
//! │  └──────────────┘  └──────────────────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Database / store share one SqlitePool (thread-safe)                 │
//! │  • BookingManager holds no mutable state                               │
//! │  • HorizonConfig is read-only after startup                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use horizon_core::BookingManager;
use horizon_db::{Database, DbConfig, DbResult, SqliteBookingStore};
use tracing::info;

use crate::config::HorizonConfig;

/// Shared state handed to every command.
#[derive(Debug, Clone)]
pub struct AppState {
    db: Database,
    bookings: BookingManager<SqliteBookingStore>,
    config: HorizonConfig,
}

impl AppState {
    /// Opens the configured database (running migrations) and wires the
    /// booking manager to it.
    pub async fn new(config: HorizonConfig) -> DbResult<Self> {
        let db = Database::new(config.db_config()).await?;
        info!(
            path = %config.database_path,
            policy = ?config.status_policy,
            "Application state ready"
        );
        Ok(Self::from_database(db, config))
    }

    /// Wraps an already-open database.
    pub fn from_database(db: Database, config: HorizonConfig) -> Self {
        let bookings = BookingManager::new(db.store(), config.status_policy);
        AppState {
            db,
            bookings,
            config,
        }
    }

    /// Fresh in-memory database with default configuration.
    pub async fn in_memory() -> DbResult<Self> {
        Self::in_memory_with(HorizonConfig::default()).await
    }

    /// Fresh in-memory database with `config`'s policy (its database path
    /// is ignored).
    pub async fn in_memory_with(config: HorizonConfig) -> DbResult<Self> {
        let db = Database::new(DbConfig::in_memory()).await?;
        Ok(Self::from_database(db, config))
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn bookings(&self) -> &BookingManager<SqliteBookingStore> {
        &self.bookings
    }

    pub fn config(&self) -> &HorizonConfig {
        &self.config
    }
}
