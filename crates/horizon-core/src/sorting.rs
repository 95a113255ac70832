//! # Booking Sort Order
//!
//! Sort keys accepted by the booking listing and the natural order.
//!
//! ```text
//! sort field (case-insensitive)   comparator
//! ─────────────────────────────   ─────────────────────────────────────────
//! checkin                         check_in
//! checkout                        check_out
//! price                           total_price
//! createdat                       created_at
//! status                          status name ("CANCELLED" < "CONFIRMED" < "PENDING")
//! default                         check_in, then created_at, then id
//!
//! direction: asc (default) | desc (reverses the comparator)
//! ```
//!
//! Ties on any field fall back to the natural order, so every ordering is
//! total.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::CoreError;
use crate::types::Booking;

// =============================================================================
// Sort Field / Direction
// =============================================================================

/// Field bookings can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    CheckIn,
    CheckOut,
    Price,
    CreatedAt,
    Status,
    #[default]
    Default,
}

impl SortField {
    fn compare(&self, a: &Booking, b: &Booking) -> Ordering {
        self.primary(a, b).then_with(|| default_booking_order(a, b))
    }

    fn primary(&self, a: &Booking, b: &Booking) -> Ordering {
        match self {
            SortField::CheckIn => a.check_in.cmp(&b.check_in),
            SortField::CheckOut => a.check_out.cmp(&b.check_out),
            SortField::Price => a.total_price.cmp(&b.total_price),
            SortField::CreatedAt => a.created_at.cmp(&b.created_at),
            SortField::Status => a.status.as_str().cmp(b.status.as_str()),
            SortField::Default => default_booking_order(a, b),
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "checkin" => Ok(SortField::CheckIn),
            "checkout" => Ok(SortField::CheckOut),
            "price" => Ok(SortField::Price),
            "createdat" => Ok(SortField::CreatedAt),
            "status" => Ok(SortField::Status),
            "default" => Ok(SortField::Default),
            _ => Err(CoreError::InvalidArgument(format!("Invalid sort field: {s}"))),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortDirection {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(CoreError::InvalidArgument(format!(
                "Invalid sort direction: {s}"
            ))),
        }
    }
}

// =============================================================================
// Ordering
// =============================================================================

/// Natural booking order: check-in, then creation time, then id.
///
/// Total over stored bookings since ids are unique.
pub fn default_booking_order(a: &Booking, b: &Booking) -> Ordering {
    a.check_in
        .cmp(&b.check_in)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sorts `bookings` in place.
pub fn sort_bookings(bookings: &mut [Booking], field: SortField, direction: SortDirection) {
    match direction {
        SortDirection::Asc => bookings.sort_by(|a, b| field.compare(a, b)),
        SortDirection::Desc => bookings.sort_by(|a, b| field.compare(b, a)),
    }
}

/// Parses loosely-typed sort parameters and sorts.
///
/// A missing direction means ascending; a missing field means the natural
/// order.
///
/// ## Errors
/// `InvalidArgument` naming the unrecognized field or direction.
pub fn sort_by(
    mut bookings: Vec<Booking>,
    field: Option<&str>,
    direction: Option<&str>,
) -> Result<Vec<Booking>, CoreError> {
    let field: SortField = field.map(str::parse).transpose()?.unwrap_or_default();
    let direction: SortDirection = direction.map(str::parse).transpose()?.unwrap_or_default();
    sort_bookings(&mut bookings, field, direction);
    Ok(bookings)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::types::BookingStatus;
    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 5, 1, hour, 0, 0).unwrap()
    }

    fn booking(id: i64, m: u32, day: u32, created_hour: u32, cents: i64) -> Booking {
        let check_in = NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        Booking {
            id,
            room_id: id,
            user_id: 1,
            check_in,
            check_out: check_in.succ_opt().unwrap(),
            status: BookingStatus::Pending,
            total_price: Money::from_cents(cents),
            created_at: at(created_hour),
        }
    }

    fn ids(bookings: &[Booking]) -> Vec<i64> {
        bookings.iter().map(|b| b.id).collect()
    }

    #[test]
    fn test_checkin_asc_with_created_at_tie_break() {
        let bookings = vec![
            booking(1, 7, 1, 8, 100),
            booking(2, 6, 15, 12, 100),
            booking(3, 6, 15, 9, 100),
        ];

        let sorted = sort_by(bookings.clone(), Some("checkin"), Some("asc")).unwrap();
        // Both on 06-15; the earlier created one comes first
        assert_eq!(ids(&sorted), vec![3, 2, 1]);

        let natural = sort_by(bookings, Some("default"), None).unwrap();
        assert_eq!(ids(&natural), vec![3, 2, 1]);
    }

    #[test]
    fn test_desc_reverses() {
        let bookings = vec![
            booking(1, 6, 1, 1, 300),
            booking(2, 6, 2, 1, 100),
            booking(3, 6, 3, 1, 200),
        ];

        let sorted = sort_by(bookings.clone(), Some("PRICE"), Some("desc")).unwrap();
        assert_eq!(ids(&sorted), vec![1, 3, 2]);

        let sorted = sort_by(bookings, Some("checkOut"), Some("DESC")).unwrap();
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_price_ties_use_natural_order() {
        let bookings = vec![
            booking(1, 6, 9, 1, 100),
            booking(2, 6, 3, 1, 100),
            booking(3, 6, 1, 1, 50),
        ];
        let sorted = sort_by(bookings, Some("price"), None).unwrap();
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_status_sorts_by_name() {
        let mut bookings = vec![
            booking(1, 6, 1, 1, 100),
            booking(2, 6, 2, 1, 100),
            booking(3, 6, 3, 1, 100),
        ];
        bookings[0].status = BookingStatus::Pending;
        bookings[1].status = BookingStatus::Confirmed;
        bookings[2].status = BookingStatus::Cancelled;

        let sorted = sort_by(bookings, Some("status"), None).unwrap();
        assert_eq!(ids(&sorted), vec![3, 2, 1]);
    }

    #[test]
    fn test_default_order_falls_back_to_id() {
        let a = booking(5, 6, 1, 1, 100);
        let b = booking(4, 6, 1, 1, 100);
        assert_eq!(default_booking_order(&a, &b), Ordering::Greater);
    }

    #[test]
    fn test_unknown_field_names_it() {
        let err = sort_by(vec![], Some("bogus"), Some("asc")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref msg) if msg.contains("bogus")));
    }

    #[test]
    fn test_unknown_direction_names_it() {
        let err = sort_by(vec![], Some("price"), Some("sideways")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref msg) if msg.contains("sideways")));
    }

    #[test]
    fn test_created_at_sort() {
        let bookings = vec![booking(1, 6, 1, 9, 100), booking(2, 6, 2, 7, 100)];
        let sorted = sort_by(bookings, Some("createdAt"), None).unwrap();
        assert_eq!(ids(&sorted), vec![2, 1]);
    }
}
