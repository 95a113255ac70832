//! # Domain Types
//!
//! Core domain types used throughout Horizon.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      Room       │   │     Booking     │   │      User       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │◄──│  room_id (FK)   │   │  id             │       │
//! │  │  room_number    │   │  user_id (FK)   │──►│  full_name      │       │
//! │  │  room_type      │   │  check_in/out   │   │  email (unique) │       │
//! │  │  capacity       │   │  status         │   │  password_hash  │       │
//! │  │  price_per_night│   │  total_price    │   │  role           │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  RoomType: Single | Double | Suite                                     │
//! │  RoomStatus: Available | Occupied | Maintenance                        │
//! │  BookingStatus: Pending | Confirmed | Cancelled                        │
//! │  Role: Client | Admin                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! `Booking::total_price` is frozen at creation. Later changes to the
//! room's nightly rate never touch existing bookings.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;

/// Store-assigned room identifier.
pub type RoomId = i64;
/// Store-assigned user identifier.
pub type UserId = i64;
/// Store-assigned booking identifier.
pub type BookingId = i64;

// =============================================================================
// Room Type / Room Status
// =============================================================================

/// Kind of room offered by the hotel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomType {
    Single,
    Double,
    Suite,
}

impl RoomType {
    /// Persisted / wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoomType::Single => "SINGLE",
            RoomType::Double => "DOUBLE",
            RoomType::Suite => "SUITE",
        }
    }
}

/// Operational status of a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
}

impl RoomStatus {
    /// Persisted / wire name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RoomStatus::Available => "AVAILABLE",
            RoomStatus::Occupied => "OCCUPIED",
            RoomStatus::Maintenance => "MAINTENANCE",
        }
    }
}

impl Default for RoomStatus {
    fn default() -> Self {
        RoomStatus::Available
    }
}

// =============================================================================
// Room
// =============================================================================

/// A bookable room in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,

    /// Human-facing room number, unique across the catalog ("101", "2B").
    pub room_number: String,

    #[serde(rename = "type")]
    pub room_type: RoomType,

    /// Maximum number of guests (always >= 1).
    pub capacity: i32,

    /// Nightly rate used to price new bookings.
    pub price_per_night: Money,

    pub status: RoomStatus,

    pub description: Option<String>,
}

/// Room fields supplied on create / update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: i32,
    pub price_per_night: Money,
    pub status: RoomStatus,
    pub description: Option<String>,
}

// =============================================================================
// User
// =============================================================================

/// Role of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Client,
    Admin,
}

impl Default for Role {
    fn default() -> Self {
        Role::Client
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub full_name: String,
    pub email: String,

    /// Argon2 PHC string. Never serialized back out.
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub password_hash: String,

    pub role: Role,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

/// User fields supplied at registration (password already hashed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

// =============================================================================
// Booking Status
// =============================================================================

/// The status of a booking.
///
/// ```text
///   PENDING ──► CONFIRMED
///      │            │
///      └────► CANCELLED ◄┘   (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    /// Created, awaiting confirmation. Blocks the room.
    Pending,
    /// Confirmed by staff. Blocks the room.
    Confirmed,
    /// Cancelled. Never blocks the room.
    Cancelled,
}

impl BookingStatus {
    /// Persisted / wire name. Also the key for sorting by status.
    pub const fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "PENDING",
            BookingStatus::Confirmed => "CONFIRMED",
            BookingStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether a booking in this status counts against availability.
    pub const fn is_blocking(&self) -> bool {
        match self {
            BookingStatus::Pending | BookingStatus::Confirmed => true,
            BookingStatus::Cancelled => false,
        }
    }

    /// Statuses that block a room.
    pub const BLOCKING: [BookingStatus; 2] = [BookingStatus::Pending, BookingStatus::Confirmed];
}

impl Default for BookingStatus {
    fn default() -> Self {
        BookingStatus::Pending
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Stay Range
// =============================================================================

/// A half-open date interval `[check_in, check_out)`.
///
/// A checkout on day X and a new check-in on day X do not overlap.
/// Construction guarantees `check_in < check_out`, so a `StayRange` always
/// covers at least one night. Deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawStay")]
pub struct StayRange {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

/// Unchecked wire shape of a `StayRange`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStay {
    check_in: NaiveDate,
    check_out: NaiveDate,
}

impl TryFrom<RawStay> for StayRange {
    type Error = CoreError;

    fn try_from(raw: RawStay) -> CoreResult<Self> {
        StayRange::new(raw.check_in, raw.check_out)
    }
}

impl StayRange {
    /// Builds a range, rejecting empty or inverted ones.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use horizon_core::types::StayRange;
    ///
    /// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
    /// assert!(StayRange::new(d(1), d(5)).is_ok());
    /// assert!(StayRange::new(d(5), d(5)).is_err());
    /// assert!(StayRange::new(d(6), d(5)).is_err());
    /// ```
    pub fn new(check_in: NaiveDate, check_out: NaiveDate) -> CoreResult<Self> {
        if check_in < check_out {
            Ok(StayRange {
                check_in,
                check_out,
            })
        } else {
            Err(CoreError::InvalidRange {
                check_in,
                check_out,
            })
        }
    }

    #[inline]
    pub const fn check_in(&self) -> NaiveDate {
        self.check_in
    }

    #[inline]
    pub const fn check_out(&self) -> NaiveDate {
        self.check_out
    }

    /// Whole nights covered by the stay (always >= 1).
    pub fn nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days()
    }

    /// Half-open overlap: `a1 < b2 && a2 > b1`.
    #[inline]
    pub fn overlaps(&self, other: &StayRange) -> bool {
        self.check_in < other.check_out && self.check_out > other.check_in
    }
}

// =============================================================================
// Booking
// =============================================================================

/// A stay booked for one room by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub room_id: RoomId,
    pub user_id: UserId,

    #[ts(as = "String")]
    pub check_in: NaiveDate,

    #[ts(as = "String")]
    pub check_out: NaiveDate,

    pub status: BookingStatus,

    /// Price fixed at creation time (snapshot).
    pub total_price: Money,

    /// Set once on insert, never updated.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// The stay covered by this booking.
    ///
    /// Stored bookings always satisfy `check_in < check_out`.
    #[inline]
    pub fn stay(&self) -> StayRange {
        StayRange {
            check_in: self.check_in,
            check_out: self.check_out,
        }
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.status.is_blocking()
    }
}

/// A validated, priced booking ready to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub stay: StayRange,
    pub status: BookingStatus,
    pub total_price: Money,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    #[test]
    fn test_stay_range_rejects_empty_and_inverted() {
        assert!(matches!(
            StayRange::new(d(6, 1), d(6, 1)),
            Err(CoreError::InvalidRange { .. })
        ));
        assert!(matches!(
            StayRange::new(d(6, 2), d(6, 1)),
            Err(CoreError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_stay_range_json_is_validated() {
        let stay: StayRange =
            serde_json::from_str(r#"{"checkIn":"2025-06-01","checkOut":"2025-06-05"}"#).unwrap();
        assert_eq!(stay.nights(), 4);
        assert_eq!(
            serde_json::to_string(&stay).unwrap(),
            r#"{"checkIn":"2025-06-01","checkOut":"2025-06-05"}"#
        );

        let inverted =
            serde_json::from_str::<StayRange>(r#"{"checkIn":"2025-06-05","checkOut":"2025-06-01"}"#);
        let err = inverted.unwrap_err();
        assert!(err.to_string().contains("Check in date must be before check out date"));

        assert!(serde_json::from_str::<StayRange>(
            r#"{"checkIn":"2025-06-05","checkOut":"2025-06-05"}"#
        )
        .is_err());
    }

    #[test]
    fn test_stay_range_nights() {
        let stay = StayRange::new(d(6, 1), d(6, 4)).unwrap();
        assert_eq!(stay.nights(), 3);

        // Across a month boundary
        let stay = StayRange::new(d(6, 29), d(7, 2)).unwrap();
        assert_eq!(stay.nights(), 3);
    }

    #[test]
    fn test_adjacent_stays_do_not_overlap() {
        let first = StayRange::new(d(6, 1), d(6, 5)).unwrap();
        let second = StayRange::new(d(6, 5), d(6, 10)).unwrap();
        assert!(!first.overlaps(&second));
        assert!(!second.overlaps(&first));
    }

    #[test]
    fn test_booking_status_blocking() {
        assert!(BookingStatus::Pending.is_blocking());
        assert!(BookingStatus::Confirmed.is_blocking());
        assert!(!BookingStatus::Cancelled.is_blocking());
        assert_eq!(BookingStatus::default(), BookingStatus::Pending);
    }

    #[test]
    fn test_enum_wire_names() {
        assert_eq!(
            serde_json::to_string(&BookingStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        assert_eq!(serde_json::to_string(&RoomType::Suite).unwrap(), "\"SUITE\"");
        assert_eq!(
            serde_json::to_string(&RoomStatus::Maintenance).unwrap(),
            "\"MAINTENANCE\""
        );
    }
}
