//! # horizon-db: Database Layer for Horizon
//!
//! This crate provides database access for the Horizon booking backend.
//! It uses SQLite with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Horizon Data Flow                                │
//! │                                                                         │
//! │  horizon-api command (create_booking)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BookingManager (horizon-core) ──► BookingStore port                   │
//! │       │                                                                 │
//! │  ┌────▼────────────────────────────────────────────────────────────┐   │
//! │  │                     horizon-db (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐  ┌──────────────────┐  ┌────────────────┐  │   │
//! │  │   │   Database    │  │   Repositories   │  │   Migrations   │  │   │
//! │  │   │   (pool.rs)   │  │ room/user/booking│  │   (embedded)   │  │   │
//! │  │   └───────────────┘  └──────────────────┘  └────────────────┘  │   │
//! │  │   ┌──────────────────────────────────────┐                      │   │
//! │  │   │ SqliteBookingStore (store.rs)        │                      │   │
//! │  │   │ transactions for the core ports      │                      │   │
//! │  │   └──────────────────────────────────────┘                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite database file (./horizon.db)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Room, user and booking repositories
//! - [`store`] - `BookingStore` implementation
//!
//! ## Usage
//!
//! ```rust,ignore
//! use horizon_core::{BookingManager, TransitionPolicy};
//! use horizon_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./horizon.db")).await?;
//! let manager = BookingManager::new(db.store(), TransitionPolicy::default());
//! let booking = manager.create(room_id, user_id, check_in, check_out).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{SqliteBookingStore, SqliteBookingTx};

// Repository re-exports for convenience
pub use repository::booking::BookingRepository;
pub use repository::room::RoomRepository;
pub use repository::user::UserRepository;
