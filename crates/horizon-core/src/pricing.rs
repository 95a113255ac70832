//! # Pricing Calculator
//!
//! `total = price_per_night × nights`, computed in integer cents.
//!
//! ```text
//! Room 101: 100.00 / night
//! Stay:     06-01 .. 06-04  (3 nights)
//!      │
//!      ▼
//! total_price(10000¢, stay) ← THIS MODULE
//!      │
//!      ▼
//! Booking.total_price = 30000¢ = 300.00 (snapshot, never recomputed)
//! ```

use crate::error::{CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Room, StayRange};
use crate::MAX_BOOKING_TOTAL_CENTS;

/// Whole nights between check-in and check-out.
#[inline]
pub fn nights(stay: &StayRange) -> i64 {
    stay.nights()
}

/// Total price for a stay at the given nightly rate.
///
/// ## Errors
/// `Validation(OutOfRange)` when the total does not fit the persisted
/// precision (12 digits, 2 fraction digits).
pub fn total_price(rate: Money, stay: &StayRange) -> CoreResult<Money> {
    let out_of_range = || ValidationError::OutOfRange {
        field: "totalPrice".to_string(),
        min: 0,
        max: MAX_BOOKING_TOTAL_CENTS,
    };

    let total = rate.checked_times(nights(stay)).ok_or_else(out_of_range)?;
    if total.cents() > MAX_BOOKING_TOTAL_CENTS {
        return Err(out_of_range().into());
    }

    Ok(total)
}

/// Prices a stay in `room` using its current nightly rate.
#[inline]
pub fn price(room: &Room, stay: &StayRange) -> CoreResult<Money> {
    total_price(room.price_per_night, stay)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{RoomStatus, RoomType};
    use chrono::NaiveDate;

    fn stay(from: u32, to: u32) -> StayRange {
        StayRange::new(
            NaiveDate::from_ymd_opt(2025, 6, from).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, to).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_three_nights_at_100() {
        let room = Room {
            id: 1,
            room_number: "101".to_string(),
            room_type: RoomType::Double,
            capacity: 2,
            price_per_night: "100.00".parse().unwrap(),
            status: RoomStatus::Available,
            description: None,
        };

        let total = price(&room, &stay(1, 4)).unwrap();
        assert_eq!(total, Money::from_cents(30_000));
        assert_eq!(total.to_string(), "300.00");
    }

    #[test]
    fn test_single_night() {
        let total = total_price(Money::from_cents(8_950), &stay(10, 11)).unwrap();
        assert_eq!(total.cents(), 8_950);
    }

    #[test]
    fn test_total_beyond_precision_rejected() {
        let rate = Money::from_cents(crate::MAX_ROOM_PRICE_CENTS);
        // 99,999,999.99 × 200 nights exceeds 12 digits
        let long = StayRange::new(
            NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 20).unwrap(),
        )
        .unwrap();
        assert!(matches!(
            total_price(rate, &long),
            Err(CoreError::Validation(ValidationError::OutOfRange { .. }))
        ));
    }
}
