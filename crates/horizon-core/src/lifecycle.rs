//! # Booking Lifecycle
//!
//! Status transitions and the pure half of booking creation.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   create() ──► PENDING ──── set_status(CONFIRMED) ───► CONFIRMED       │
//! │                   │                                        │            │
//! │                   └──── cancel() ───► CANCELLED ◄── cancel()┘           │
//! │                                         (terminal)                      │
//! │                                                                         │
//! │  Same-state moves are no-ops and always allowed (cancel is idempotent). │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Transition Policy
//! The booking desk historically allowed setting any status from any
//! status. `TransitionPolicy::Permissive` keeps that behavior;
//! `TransitionPolicy::Strict` enforces the table above. Under both, a move
//! from CANCELLED back to a blocking status must pass the overlap check
//! again (see `needs_overlap_check`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

use crate::availability::is_overlapping;
use crate::error::{CoreError, CoreResult, ValidationError};
use crate::pricing;
use crate::types::{Booking, BookingStatus, NewBooking, Room, StayRange, User};

// =============================================================================
// Transition Policy
// =============================================================================

/// How `set_status` treats transitions outside the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPolicy {
    /// Any status may be set from any status.
    #[default]
    Permissive,
    /// Only PENDING→CONFIRMED, PENDING→CANCELLED, CONFIRMED→CANCELLED
    /// (plus same-state no-ops).
    Strict,
}

impl FromStr for TransitionPolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(TransitionPolicy::Permissive),
            "strict" => Ok(TransitionPolicy::Strict),
            other => Err(ValidationError::InvalidFormat {
                field: "statusPolicy".to_string(),
                reason: format!("expected 'permissive' or 'strict', got '{other}'"),
            }),
        }
    }
}

/// Whether the state machine allows `from → to`.
pub const fn is_legal_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;

    match (from, to) {
        (Pending, Pending) | (Confirmed, Confirmed) | (Cancelled, Cancelled) => true,
        (Pending, Confirmed) | (Pending, Cancelled) | (Confirmed, Cancelled) => true,
        (Confirmed, Pending) | (Cancelled, Pending) | (Cancelled, Confirmed) => false,
    }
}

/// Moving from a non-blocking to a blocking status re-occupies the room.
pub const fn needs_overlap_check(from: BookingStatus, to: BookingStatus) -> bool {
    !from.is_blocking() && to.is_blocking()
}

/// Applies `policy` to a requested status change.
pub fn check_transition(
    policy: TransitionPolicy,
    booking: &Booking,
    to: BookingStatus,
) -> CoreResult<()> {
    match policy {
        TransitionPolicy::Permissive => Ok(()),
        TransitionPolicy::Strict if is_legal_transition(booking.status, to) => Ok(()),
        TransitionPolicy::Strict => Err(CoreError::IllegalTransition {
            booking_id: booking.id,
            from: booking.status,
            to,
        }),
    }
}

/// Verifies a status change would not create an overlap with `others`.
///
/// `others` may include `booking` itself; it is skipped.
pub fn check_reactivation(
    booking: &Booking,
    to: BookingStatus,
    others: &[Booking],
) -> CoreResult<()> {
    if !needs_overlap_check(booking.status, to) {
        return Ok(());
    }

    let stay = booking.stay();
    let rivals = others.iter().filter(|other| other.id != booking.id);
    if is_overlapping(rivals, booking.room_id, &stay) {
        return Err(CoreError::Conflict {
            room_id: booking.room_id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
        });
    }

    Ok(())
}

// =============================================================================
// Booking Preparation
// =============================================================================

/// Validates and prices a new booking against the room's current bookings.
///
/// `existing` is what the store returned for the room and range; the overlap
/// rule is re-applied here so the core stays the authority on it.
///
/// ## Returns
/// A `NewBooking` in PENDING status with the snapshot price and `now` as its
/// creation time.
pub fn prepare_booking(
    room: &Room,
    user: &User,
    stay: StayRange,
    existing: &[Booking],
    now: DateTime<Utc>,
) -> CoreResult<NewBooking> {
    if is_overlapping(existing, room.id, &stay) {
        return Err(CoreError::Conflict {
            room_id: room.id,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
        });
    }

    let total_price = pricing::price(room, &stay)?;
    debug!(
        room_id = room.id,
        user_id = user.id,
        nights = stay.nights(),
        total = %total_price,
        "Booking priced"
    );

    Ok(NewBooking {
        room_id: room.id,
        user_id: user.id,
        stay,
        status: BookingStatus::Pending,
        total_price,
        created_at: now,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
