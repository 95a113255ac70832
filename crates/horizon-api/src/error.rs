//! # API Error Type
//!
//! Unified error type for Horizon commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Horizon                                │
//! │                                                                         │
//! │  create_booking(room 101, 06-03 .. 06-07)                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  ApiResult<T>                                                    │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule violation? ─── CoreError::Conflict ──────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Database failure? ─── DbError::QueryFailed ─── ApiError ──────►│  │
//! │  │         │                     │                                  │  │
//! │  │         │                     └─► error! + correlation id       │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "CONFLICT",                                                 │
//! │    "message": "Room already booked for this date range" }              │
//! │                                                                         │
//! │  { "code": "INTERNAL",                                                 │
//! │    "message": "Internal error",                                        │
//! │    "correlationId": "6f1c..." }   ← grep the logs for this id          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (SQL text, file paths) never leave this module; they go
//! to the log next to the correlation id.

use horizon_core::{CoreError, StorageError, ValidationError};
use horizon_db::DbError;
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Message for a date range already taken by an active booking.
pub const ROOM_ALREADY_BOOKED: &str = "Room already booked for this date range";

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Booking not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Set on internal failures; matches the logged error event
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correlation_id: Option<String>,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Bad sort field / direction or filter value (400)
    InvalidArgument,

    /// Check-in not strictly before check-out (400)
    InvalidRange,

    /// Wrong email or password (401)
    Unauthorized,

    /// Overlapping booking, duplicate key, referenced room (409)
    Conflict,

    /// Status move refused by the strict policy (422)
    IllegalTransition,

    /// Database unreachable or busy (503)
    Unavailable,

    /// Internal server error (500)
    Internal,
}

impl ErrorCode {
    /// HTTP-style status number for transports that need one.
    pub const fn http_status(&self) -> u16 {
        match self {
            ErrorCode::NotFound => 404,
            ErrorCode::ValidationError | ErrorCode::InvalidArgument | ErrorCode::InvalidRange => {
                400
            }
            ErrorCode::Unauthorized => 401,
            ErrorCode::Conflict => 409,
            ErrorCode::IllegalTransition => 422,
            ErrorCode::Unavailable => 503,
            ErrorCode::Internal => 500,
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            correlation_id: None,
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Unauthorized, message)
    }

    /// Creates an internal error.
    ///
    /// `detail` is logged with a fresh correlation id; the caller only sees
    /// the id.
    pub fn internal(detail: impl fmt::Display) -> Self {
        Self::with_correlation(ErrorCode::Internal, "Internal error", detail)
    }

    /// Creates an unavailable error (logged like `internal`).
    pub fn unavailable(detail: impl fmt::Display) -> Self {
        Self::with_correlation(ErrorCode::Unavailable, "Service temporarily unavailable", detail)
    }

    fn with_correlation(code: ErrorCode, message: &str, detail: impl fmt::Display) -> Self {
        let correlation_id = Uuid::new_v4().to_string();
        tracing::error!(correlation_id = %correlation_id, code = ?code, "{}", detail);

        ApiError {
            code,
            message: message.to_string(),
            correlation_id: Some(correlation_id),
        }
    }

    /// HTTP-style status number of this error's code.
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, id),
            DbError::UniqueViolation { field, value } => {
                ApiError::conflict(format!("{} '{}' already exists", field, value))
            }
            DbError::ForeignKeyViolation { message } => {
                tracing::warn!("Foreign key violation: {}", message);
                ApiError::conflict("Resource is still referenced by other records")
            }
            DbError::CheckViolation { message } => {
                tracing::warn!("Check constraint failed: {}", message);
                ApiError::validation("Value violates a database constraint")
            }
            DbError::BookingOverlap => ApiError::conflict(ROOM_ALREADY_BOOKED),
            DbError::ConnectionFailed(_) | DbError::PoolExhausted | DbError::Busy => {
                ApiError::unavailable(err)
            }
            DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::TransactionFailed(_)
            | DbError::Internal(_) => ApiError::internal(err),
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::RoomNotFound(id) => ApiError::not_found("Room", id),
            CoreError::UserNotFound(id) => ApiError::not_found("User", id),
            CoreError::BookingNotFound(id) => ApiError::not_found("Booking", id),
            CoreError::InvalidRange { .. } => ApiError::new(
                ErrorCode::InvalidRange,
                "Check in date must be before check out date",
            ),
            CoreError::Conflict { .. } => ApiError::conflict(ROOM_ALREADY_BOOKED),
            CoreError::InvalidArgument(message) => {
                ApiError::new(ErrorCode::InvalidArgument, message)
            }
            CoreError::IllegalTransition { .. } => {
                ApiError::new(ErrorCode::IllegalTransition, err.to_string())
            }
            CoreError::Validation(e) => e.into(),
            CoreError::Credential(detail) => ApiError::internal(detail),
            CoreError::Storage(StorageError::Unavailable(detail)) => {
                ApiError::unavailable(detail)
            }
            CoreError::Storage(other) => ApiError::internal(other),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Duplicate { .. } => ApiError::conflict(err.to_string()),
            other => ApiError::validation(other.to_string()),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_core_error_mapping() {
        let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();

        let err: ApiError = CoreError::BookingNotFound(42).into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Booking not found: 42");
        assert_eq!(err.http_status(), 404);

        let err: ApiError = CoreError::Conflict {
            room_id: 1,
            check_in: d(1),
            check_out: d(5),
        }
        .into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, ROOM_ALREADY_BOOKED);

        let err: ApiError = CoreError::InvalidRange {
            check_in: d(5),
            check_out: d(5),
        }
        .into();
        assert_eq!(err.code, ErrorCode::InvalidRange);
        assert_eq!(err.http_status(), 400);
        assert_eq!(err.message, "Check in date must be before check out date");
        assert_eq!(
            serde_json::to_value(err.code).unwrap(),
            serde_json::json!("INVALID_RANGE")
        );

        let err: ApiError = CoreError::InvalidArgument("Invalid sort field: bogus".into()).into();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
        assert!(err.message.contains("bogus"));
        assert!(err.correlation_id.is_none());
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err: ApiError = DbError::QueryFailed("no such table: bookings".into()).into();
        assert_eq!(err.code, ErrorCode::Internal);
        assert_eq!(err.message, "Internal error");
        assert!(!err.message.contains("bookings"));

        let id = err.correlation_id.clone().unwrap();
        assert!(Uuid::parse_str(&id).is_ok());

        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INTERNAL");
        assert_eq!(json["correlationId"], id.as_str());
    }

    #[test]
    fn test_unavailable_storage() {
        let err: ApiError = CoreError::Storage(StorageError::Unavailable("pool closed".into())).into();
        assert_eq!(err.code, ErrorCode::Unavailable);
        assert_eq!(err.http_status(), 503);
        assert!(err.correlation_id.is_some());
    }

    #[test]
    fn test_db_error_mapping() {
        let err: ApiError = DbError::duplicate("roomNumber", "101").into();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "roomNumber '101' already exists");

        let err: ApiError = DbError::BookingOverlap.into();
        assert_eq!(err.message, ROOM_ALREADY_BOOKED);

        let json = serde_json::to_value(ApiError::not_found("Room", 7)).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("correlationId").is_none());
    }
}
