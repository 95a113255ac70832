//! # Availability Checker
//!
//! Decides whether a room is free for a stay.
//!
//! ## The Overlap Rule
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [a1, a2) and [b1, b2) overlap  ⇔  a1 < b2  AND  a2 > b1                │
//! │                                                                         │
//! │  existing:   |=====06-01 ... 06-05)                                    │
//! │  request:                      [06-05 ... 06-10====|   ✅ no overlap    │
//! │  request:              [06-03 ... 06-07)               ❌ overlap       │
//! │                                                                         │
//! │  Only PENDING / CONFIRMED bookings count. CANCELLED never blocks.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Ranges reaching this module are always `StayRange`s, so a zero-night
//! request never gets here.

use chrono::NaiveDate;

use crate::error::{CoreError, CoreResult};
use crate::types::{Booking, Room, RoomId, RoomType, StayRange};

/// Whether `booking` blocks `room_id` for `stay`.
#[inline]
pub fn blocks(booking: &Booking, room_id: RoomId, stay: &StayRange) -> bool {
    booking.room_id == room_id && booking.is_blocking() && booking.stay().overlaps(stay)
}

/// Whether any of `bookings` blocks `room_id` for `stay`.
///
/// ## Example
/// ```rust
/// use chrono::{NaiveDate, Utc};
/// use horizon_core::availability::is_overlapping;
/// use horizon_core::{Booking, BookingStatus, Money, StayRange};
///
/// let d = |day| NaiveDate::from_ymd_opt(2025, 6, day).unwrap();
/// let existing = Booking {
///     id: 1,
///     room_id: 10,
///     user_id: 1,
///     check_in: d(1),
///     check_out: d(5),
///     status: BookingStatus::Pending,
///     total_price: Money::from_cents(40_000),
///     created_at: Utc::now(),
/// };
///
/// let adjacent = StayRange::new(d(5), d(10)).unwrap();
/// let clash = StayRange::new(d(3), d(7)).unwrap();
/// assert!(!is_overlapping([&existing], 10, &adjacent));
/// assert!(is_overlapping([&existing], 10, &clash));
/// ```
pub fn is_overlapping<'a>(
    bookings: impl IntoIterator<Item = &'a Booking>,
    room_id: RoomId,
    stay: &StayRange,
) -> bool {
    bookings
        .into_iter()
        .any(|booking| blocks(booking, room_id, stay))
}

// =============================================================================
// Availability Query
// =============================================================================

/// Parameters of a "which rooms are free" search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub stay: StayRange,
    /// Minimum capacity the room must offer.
    pub guests: Option<i32>,
    pub room_type: Option<RoomType>,
}

impl AvailabilityQuery {
    /// Builds a query from loosely-typed API input.
    ///
    /// ## Errors
    /// - `InvalidArgument` if either date is missing or `guests < 1`
    /// - `InvalidRange` if `check_in` is not before `check_out`
    pub fn new(
        check_in: Option<NaiveDate>,
        check_out: Option<NaiveDate>,
        guests: Option<i32>,
        room_type: Option<RoomType>,
    ) -> CoreResult<Self> {
        let (check_in, check_out) = match (check_in, check_out) {
            (Some(check_in), Some(check_out)) => (check_in, check_out),
            _ => {
                return Err(CoreError::InvalidArgument(
                    "checkIn and checkOut are required".to_string(),
                ))
            }
        };

        if let Some(guests) = guests {
            if guests < 1 {
                return Err(CoreError::InvalidArgument(format!(
                    "guests must be at least 1, got {guests}"
                )));
            }
        }

        Ok(AvailabilityQuery {
            stay: StayRange::new(check_in, check_out)?,
            guests,
            room_type,
        })
    }

    /// Capacity and type filter, ignoring bookings.
    pub fn matches_room(&self, room: &Room) -> bool {
        let fits = self.guests.map_or(true, |guests| room.capacity >= guests);
        let kind = self.room_type.map_or(true, |kind| room.room_type == kind);
        fits && kind
    }

    /// A room is available iff it passes the filter and nothing blocks it.
    pub fn is_available<'a>(
        &self,
        room: &Room,
        bookings: impl IntoIterator<Item = &'a Booking>,
    ) -> bool {
        self.matches_room(room) && !is_overlapping(bookings, room.id, &self.stay)
    }
}

/// Filters `rooms` down to the ones available for `query`, ordered by
/// room number.
pub fn available_rooms(rooms: Vec<Room>, bookings: &[Booking], query: &AvailabilityQuery) -> Vec<Room> {
    let mut free: Vec<Room> = rooms
        .into_iter()
        .filter(|room| query.is_available(room, bookings))
        .collect();
    free.sort_by(|a, b| a.room_number.cmp(&b.room_number));
    free
}

// =============================================================================
// Unit Tests
// =============================================================================
