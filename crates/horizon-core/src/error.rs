//! # Error Types
//!
//! Domain-specific error types for horizon-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  horizon-core errors (this file)                                       │
//! │  ├── CoreError        - Booking rule violations                        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  horizon-core ports (ports.rs)                                         │
//! │  └── StorageError     - What a store implementation reports            │
//! │                                                                         │
//! │  horizon-db errors (separate crate)                                    │
//! │  └── DbError          - Database operation failures → StorageError     │
//! │                                                                         │
//! │  horizon-api errors                                                    │
//! │  └── ApiError         - code + message + correlation id                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → caller                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use thiserror::Error;

use crate::ports::StorageError;
use crate::types::{BookingId, BookingStatus, RoomId, UserId};

// =============================================================================
// Core Error
// =============================================================================

/// Booking rule errors.
///
/// Every variant is a local, synchronous failure surfaced to the caller.
/// Nothing here is retried automatically.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Room not found: {0}")]
    RoomNotFound(RoomId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Booking not found: {0}")]
    BookingNotFound(BookingId),

    /// Check-in is not strictly before check-out.
    #[error("Check in date must be before check out date ({check_in} .. {check_out})")]
    InvalidRange {
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// An active (PENDING/CONFIRMED) booking already covers part of the range.
    ///
    /// ## User Workflow
    /// ```text
    /// Room 101 booked 06-01 .. 06-05 (PENDING)
    ///      │
    ///      ▼
    /// create(101, 06-03 .. 06-07)
    ///      │
    ///      ▼
    /// Conflict { room_id: 101, .. } → "Room already booked for this date range"
    /// ```
    #[error("Room {room_id} already booked for {check_in} .. {check_out}")]
    Conflict {
        room_id: RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// Unrecognized sort field, sort direction or filter value.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Status change refused by the strict transition policy.
    #[error("Booking {booking_id} cannot move from {from} to {to}")]
    IllegalTransition {
        booking_id: BookingId,
        from: BookingStatus,
        to: BookingStatus,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A password could not be hashed.
    #[error("Credential error: {0}")]
    Credential(String),

    /// The storage port failed (connection lost, constraint, busy...).
    #[error("Storage error: {0}")]
    Storage(StorageError),
}

impl From<StorageError> for CoreError {
    /// Constraint-level overlap reported by the store is the same business
    /// failure as the in-transaction check.
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Overlap {
                room_id,
                check_in,
                check_out,
            } => CoreError::Conflict {
                room_id,
                check_in,
                check_out,
            },
            other => CoreError::Storage(other),
        }
    }
}

impl CoreError {
    /// True for the "referenced entity absent" family.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            CoreError::RoomNotFound(_) | CoreError::UserNotFound(_) | CoreError::BookingNotFound(_)
        )
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before any storage access.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email, bad amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., email already registered).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::RoomNotFound(7);
        assert_eq!(err.to_string(), "Room not found: 7");
        assert!(err.is_not_found());

        let err = CoreError::InvalidArgument("Invalid sort field: bogus".to_string());
        assert!(err.to_string().contains("bogus"));
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");

        let err = ValidationError::TooShort {
            field: "password".to_string(),
            min: 6,
        };
        assert_eq!(err.to_string(), "password must be at least 6 characters");
    }

    #[test]
    fn test_storage_overlap_becomes_conflict() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
        let err: CoreError = StorageError::Overlap {
            room_id: 3,
            check_in: d(1),
            check_out: d(4),
        }
        .into();
        assert!(matches!(err, CoreError::Conflict { room_id: 3, .. }));

        let err: CoreError = StorageError::Unavailable("pool closed".to_string()).into();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
