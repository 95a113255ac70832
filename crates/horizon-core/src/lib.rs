//! # horizon-core: Pure Booking Rules for Horizon
//!
//! This crate is the **heart** of the Horizon room-booking backend. It owns
//! the rule that decides whether a room is free, how a stay is priced and
//! how a booking moves through its lifecycle.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Horizon Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 horizon-api (command layer)                     │   │
//! │  │   create_booking, cancel_booking, list_bookings, rooms, auth    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ horizon-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────┐ ┌─────────┐ ┌───────────┐ ┌──────────────┐   │   │
//! │  │  │ availability │ │ pricing │ │ lifecycle │ │   sorting    │   │   │
//! │  │  └──────────────┘ └─────────┘ └───────────┘ └──────────────┘   │   │
//! │  │            ▲             BookingManager                         │   │
//! │  │            └──────── ports (BookingStore / BookingTx) ─────┐    │   │
//! │  └────────────────────────────────────────────────────────────┼────┘   │
//! │                                                               │        │
//! │  ┌────────────────────────────────────────────────────────────▼────┐   │
//! │  │              horizon-db (SQLite implementation)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Room, User, Booking, StayRange, enums)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules for rooms and users
//! - [`credentials`] - Argon2 password hashing and verification
//! - [`availability`] - Overlap rule and room availability filter
//! - [`pricing`] - Night count and total price
//! - [`lifecycle`] - Status transitions and booking preparation
//! - [`sorting`] - Booking sort fields and the natural order
//! - [`ports`] - Storage traits the manager calls through
//! - [`manager`] - `BookingManager`, the transactional orchestration
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::NaiveDate;
//! use horizon_core::money::Money;
//! use horizon_core::pricing::total_price;
//! use horizon_core::types::StayRange;
//!
//! let stay = StayRange::new(
//!     NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
//! )
//! .unwrap();
//!
//! let total = total_price(Money::from_cents(10_000), &stay).unwrap();
//! assert_eq!(total.to_string(), "300.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod availability;
pub mod credentials;
pub mod error;
pub mod lifecycle;
pub mod manager;
pub mod money;
pub mod ports;
pub mod pricing;
pub mod sorting;
pub mod types;
pub mod validation;

#[cfg(test)]
pub(crate) mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use lifecycle::TransitionPolicy;
pub use manager::BookingManager;
pub use money::Money;
pub use ports::{BookingFilter, BookingStore, BookingTx, StorageError};
pub use sorting::{SortDirection, SortField};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Largest nightly rate a room may carry, in cents.
///
/// Persisted with 10 total digits and 2 fraction digits: 99,999,999.99.
pub const MAX_ROOM_PRICE_CENTS: i64 = 9_999_999_999;

/// Largest booking total, in cents.
///
/// Persisted with 12 total digits and 2 fraction digits: 9,999,999,999.99.
pub const MAX_BOOKING_TOTAL_CENTS: i64 = 999_999_999_999;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;
