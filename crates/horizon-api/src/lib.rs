//! # horizon-api: Command Layer for Horizon
//!
//! Transport-independent entry points of the Horizon booking backend. A
//! transport (HTTP handlers, IPC, a CLI) calls [`start`] once, keeps the
//! returned [`AppState`] and forwards requests to the functions in
//! [`commands`].
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Load Configuration ───────────────────────────────────────────────► │
//! │     • HORIZON_* environment variables with defaults                     │
//! │                                                                         │
//! │  2. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter (HORIZON_LOG, default info)    │
//! │                                                                         │
//! │  3. Open Database ────────────────────────────────────────────────────► │
//! │     • SQLite pool (WAL, foreign keys)                                   │
//! │     • Run embedded migrations                                           │
//! │                                                                         │
//! │  4. Build AppState ───────────────────────────────────────────────────► │
//! │     • BookingManager over SqliteBookingStore + transition policy        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`config`] - `HorizonConfig` from the environment
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - `ApiError` with codes and correlation ids
//! - [`dto`] - Request / response shapes
//! - [`state`] - `AppState`
//! - [`commands`] - Auth, room and booking commands

pub mod commands;
pub mod config;
pub mod dto;
pub mod error;
pub mod state;
pub mod telemetry;

pub use config::{ConfigError, HorizonConfig};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use state::AppState;

use horizon_db::DbError;
use tracing::info;

/// Why [`start`] failed.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Loads configuration, installs logging and opens the database.
pub async fn start() -> Result<AppState, StartupError> {
    let config = HorizonConfig::load()?;
    telemetry::init_tracing(&config.log_filter);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting Horizon booking backend"
    );

    Ok(AppState::new(config).await?)
}
