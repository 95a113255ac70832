//! # SQLite Booking Store
//!
//! Implements the core storage ports (`BookingStore` / `BookingTx`) on a
//! `sqlx` transaction.
//!
//! ## Linearizing Writers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request A                         request B                            │
//! │  ─────────                         ─────────                            │
//! │  begin() → BEGIN                                                        │
//! │           claim writer lock ✓      begin() → BEGIN                      │
//! │  overlapping_blocking → []                  claim writer lock ⏳ (busy)  │
//! │  insert_booking                                                          │
//! │  commit ─────────────────────────────────► lock granted                  │
//! │                                    overlapping_blocking → [A]           │
//! │                                    Conflict                             │
//! │                                                                         │
//! │  Backstop: the bookings_no_overlap_* triggers reject any overlapping    │
//! │  write that reaches SQLite by another path.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;
use horizon_core::ports::StorageResult;
use horizon_core::{
    Booking, BookingFilter, BookingId, BookingStatus, BookingStore, BookingTx, NewBooking, Room,
    RoomId, StayRange, StorageError, User, UserId,
};
use sqlx::{Sqlite, SqlitePool, Transaction};
use tracing::{debug, warn};

use crate::error::DbError;
use crate::repository::{booking, room, user};

/// `BookingStore` over a SQLite pool.
#[derive(Debug, Clone)]
pub struct SqliteBookingStore {
    pool: SqlitePool,
}

impl SqliteBookingStore {
    pub fn new(pool: SqlitePool) -> Self {
        SqliteBookingStore { pool }
    }
}

/// One open write transaction. Dropping it rolls back.
pub struct SqliteBookingTx {
    tx: Transaction<'static, Sqlite>,
}

fn overlap_of(booking: &Booking) -> StorageError {
    StorageError::Overlap {
        room_id: booking.room_id,
        check_in: booking.check_in,
        check_out: booking.check_out,
    }
}

#[async_trait]
impl BookingTx for SqliteBookingTx {
    async fn find_room(&mut self, id: RoomId) -> StorageResult<Option<Room>> {
        Ok(room::find_room(&mut *self.tx, id).await?)
    }

    async fn find_user(&mut self, id: UserId) -> StorageResult<Option<User>> {
        Ok(user::find_user(&mut *self.tx, id).await?)
    }

    async fn find_booking(&mut self, id: BookingId) -> StorageResult<Option<Booking>> {
        Ok(booking::find_booking(&mut *self.tx, id).await?)
    }

    async fn overlapping_blocking(
        &mut self,
        room_id: RoomId,
        stay: &StayRange,
    ) -> StorageResult<Vec<Booking>> {
        Ok(booking::overlapping_blocking(&mut *self.tx, room_id, stay).await?)
    }

    async fn insert_booking(&mut self, new: &NewBooking) -> StorageResult<Booking> {
        match booking::insert_booking(&mut *self.tx, new).await {
            Ok(created) => Ok(created),
            Err(DbError::BookingOverlap) => {
                warn!(room_id = new.room_id, "Overlap trigger rejected booking insert");
                Err(StorageError::Overlap {
                    room_id: new.room_id,
                    check_in: new.stay.check_in(),
                    check_out: new.stay.check_out(),
                })
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn update_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> StorageResult<Booking> {
        match booking::update_status(&mut *self.tx, id, status).await {
            Ok(Some(updated)) => Ok(updated),
            Ok(None) => Err(DbError::not_found("Booking", id).into()),
            Err(DbError::BookingOverlap) => {
                warn!(booking_id = id, "Overlap trigger rejected status change");
                match booking::find_booking(&mut *self.tx, id).await? {
                    Some(existing) => Err(overlap_of(&existing)),
                    None => Err(DbError::not_found("Booking", id).into()),
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    async fn commit(self) -> StorageResult<()> {
        self.tx
            .commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for SqliteBookingStore {
    type Tx = SqliteBookingTx;

    async fn begin(&self) -> StorageResult<SqliteBookingTx> {
        let mut tx = self.pool.begin().await.map_err(DbError::from)?;

        // Writer lock first, so the overlap read and the write share a snapshot
        sqlx::query("UPDATE bookings SET id = id WHERE 0")
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)?;

        debug!("Booking transaction started");
        Ok(SqliteBookingTx { tx })
    }

    async fn find_booking(&self, id: BookingId) -> StorageResult<Option<Booking>> {
        Ok(booking::find_booking(&self.pool, id).await?)
    }

    async fn find_user(&self, id: UserId) -> StorageResult<Option<User>> {
        Ok(user::find_user(&self.pool, id).await?)
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> StorageResult<Vec<Booking>> {
        Ok(booking::list_bookings(&self.pool, filter).await?)
    }

    async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        Ok(room::list_rooms(&self.pool).await?)
    }

    async fn blocking_bookings_in(&self, stay: &StayRange) -> StorageResult<Vec<Booking>> {
        Ok(booking::blocking_in(&self.pool, stay).await?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
