//! # Booking Repository
//!
//! Booking reads, plus raw inserts/updates shared with the transactional
//! store.
//!
//! ## Overlap Query
//! ```text
//! SELECT ... FROM bookings
//! WHERE room_id = ?room
//!   AND status IN ('PENDING', 'CONFIRMED')
//!   AND check_in  < ?check_out        ─┐ half-open overlap
//!   AND check_out > ?check_in         ─┘ (touching stays don't clash)
//! ```
//!
//! Lifecycle rules live in `horizon_core::BookingManager`; the insert here
//! does not re-check them (the triggers still do).

use horizon_core::{
    Booking, BookingFilter, BookingId, BookingStatus, NewBooking, RoomId, StayRange,
};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

const BOOKING_COLUMNS: &str =
    "id, room_id, user_id, check_in, check_out, status, total_price, created_at";

const BLOCKING_STATUSES: &str = "('PENDING', 'CONFIRMED')";

// =============================================================================
// Executor-level queries
// =============================================================================

pub(crate) async fn find_booking<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: BookingId,
) -> DbResult<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
    let booking = sqlx::query_as::<_, Booking>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(booking)
}

/// Blocking bookings of `room_id` overlapping `stay`.
pub(crate) async fn overlapping_blocking<'e, E: SqliteExecutor<'e>>(
    executor: E,
    room_id: RoomId,
    stay: &StayRange,
) -> DbResult<Vec<Booking>> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings \
         WHERE room_id = ?1 AND status IN {BLOCKING_STATUSES} \
         AND check_in < ?3 AND check_out > ?2 \
         ORDER BY id"
    );
    let bookings = sqlx::query_as::<_, Booking>(&sql)
        .bind(room_id)
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_all(executor)
        .await?;
    Ok(bookings)
}

/// Blocking bookings of any room overlapping `stay`.
pub(crate) async fn blocking_in<'e, E: SqliteExecutor<'e>>(
    executor: E,
    stay: &StayRange,
) -> DbResult<Vec<Booking>> {
    let sql = format!(
        "SELECT {BOOKING_COLUMNS} FROM bookings \
         WHERE status IN {BLOCKING_STATUSES} \
         AND check_in < ?2 AND check_out > ?1 \
         ORDER BY id"
    );
    let bookings = sqlx::query_as::<_, Booking>(&sql)
        .bind(stay.check_in())
        .bind(stay.check_out())
        .fetch_all(executor)
        .await?;
    Ok(bookings)
}

pub(crate) async fn list_bookings<'e, E: SqliteExecutor<'e>>(
    executor: E,
    filter: &BookingFilter,
) -> DbResult<Vec<Booking>> {
    let mut builder: QueryBuilder<Sqlite> =
        QueryBuilder::new(format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE 1 = 1"));

    if let Some(user_id) = filter.user_id {
        builder.push(" AND user_id = ").push_bind(user_id);
    }
    if let Some(room_id) = filter.room_id {
        builder.push(" AND room_id = ").push_bind(room_id);
    }
    if let Some(status) = filter.status {
        builder.push(" AND status = ").push_bind(status);
    }
    builder.push(" ORDER BY id");

    let bookings = builder
        .build_query_as::<Booking>()
        .fetch_all(executor)
        .await?;

    debug!(count = bookings.len(), "Bookings listed");
    Ok(bookings)
}

pub(crate) async fn insert_booking<'e, E: SqliteExecutor<'e>>(
    executor: E,
    booking: &NewBooking,
) -> DbResult<Booking> {
    let sql = format!(
        "INSERT INTO bookings (room_id, user_id, check_in, check_out, status, total_price, created_at) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {BOOKING_COLUMNS}"
    );
    let created = sqlx::query_as::<_, Booking>(&sql)
        .bind(booking.room_id)
        .bind(booking.user_id)
        .bind(booking.stay.check_in())
        .bind(booking.stay.check_out())
        .bind(booking.status)
        .bind(booking.total_price)
        .bind(booking.created_at)
        .fetch_one(executor)
        .await?;
    Ok(created)
}

/// Sets the status of booking `id`; `None` if it doesn't exist.
pub(crate) async fn update_status<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: BookingId,
    status: BookingStatus,
) -> DbResult<Option<Booking>> {
    let sql = format!("UPDATE bookings SET status = ?1 WHERE id = ?2 RETURNING {BOOKING_COLUMNS}");
    let updated = sqlx::query_as::<_, Booking>(&sql)
        .bind(status)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(updated)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for booking database operations.
///
/// Mutations here skip the lifecycle rules; go through
/// `BookingManager` for anything user-facing.
#[derive(Debug, Clone)]
pub struct BookingRepository {
    pool: SqlitePool,
}

impl BookingRepository {
    /// Creates a new BookingRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BookingRepository { pool }
    }

    pub async fn get_by_id(&self, id: BookingId) -> DbResult<Option<Booking>> {
        find_booking(&self.pool, id).await
    }

    /// Bookings matching `filter`, by id.
    pub async fn list(&self, filter: &BookingFilter) -> DbResult<Vec<Booking>> {
        list_bookings(&self.pool, filter).await
    }

    /// Whether any booking, in any status, references `room_id`.
    pub async fn exists_for_room(&self, room_id: RoomId) -> DbResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE room_id = ?1)")
                .bind(room_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
