//! # Storage Ports
//!
//! The traits `BookingManager` persists through. horizon-db implements them
//! on SQLite; the core's tests implement them in memory.
//!
//! ## Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  let mut tx = store.begin().await?;       ◄── writer isolation starts   │
//! │  tx.find_room(..) / tx.find_booking(..)   ◄── read current state        │
//! │  tx.overlapping_blocking(..)              ◄── read what could conflict  │
//! │  (pure checks in availability / lifecycle)                              │
//! │  tx.insert_booking(..) / tx.update_status(..)                           │
//! │  tx.commit().await?;                      ◄── durable                   │
//! │                                                                         │
//! │  Dropping `tx` without commit discards every write.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! An implementation must make the read-check-write sequence linearizable
//! with respect to other transactions on the same room.

use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

use crate::types::{
    Booking, BookingId, BookingStatus, NewBooking, Room, RoomId, StayRange, User, UserId,
};

// =============================================================================
// Storage Error
// =============================================================================

/// Failure reported by a store implementation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The store's own overlap guard rejected a write.
    #[error("Room {room_id} already booked for {check_in} .. {check_out}")]
    Overlap {
        room_id: RoomId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    },

    /// Connection, pool or lock could not be obtained.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Any other failed statement.
    #[error("Storage query failed: {0}")]
    Query(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

// =============================================================================
// Booking Filter
// =============================================================================

/// Optional criteria for listing bookings, combined with AND.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingFilter {
    pub user_id: Option<UserId>,
    pub room_id: Option<RoomId>,
    pub status: Option<BookingStatus>,
}

impl BookingFilter {
    pub fn for_user(user_id: UserId) -> Self {
        BookingFilter {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn for_room(room_id: RoomId) -> Self {
        BookingFilter {
            room_id: Some(room_id),
            ..Default::default()
        }
    }

    pub fn with_status(mut self, status: BookingStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn matches(&self, booking: &Booking) -> bool {
        self.user_id.map_or(true, |id| booking.user_id == id)
            && self.room_id.map_or(true, |id| booking.room_id == id)
            && self.status.map_or(true, |status| booking.status == status)
    }
}

// =============================================================================
// Traits
// =============================================================================

/// One open storage transaction.
#[async_trait]
pub trait BookingTx: Send {
    async fn find_room(&mut self, id: RoomId) -> StorageResult<Option<Room>>;

    async fn find_user(&mut self, id: UserId) -> StorageResult<Option<User>>;

    async fn find_booking(&mut self, id: BookingId) -> StorageResult<Option<Booking>>;

    /// PENDING/CONFIRMED bookings of `room_id` whose stay overlaps `stay`.
    async fn overlapping_blocking(
        &mut self,
        room_id: RoomId,
        stay: &StayRange,
    ) -> StorageResult<Vec<Booking>>;

    /// Persists `booking` and returns it with its assigned id.
    async fn insert_booking(&mut self, booking: &NewBooking) -> StorageResult<Booking>;

    /// Sets the status of an existing booking and returns the updated row.
    async fn update_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> StorageResult<Booking>;

    async fn commit(self) -> StorageResult<()>;
}

/// Durable store for rooms, users and bookings.
#[async_trait]
pub trait BookingStore: Send + Sync {
    type Tx: BookingTx;

    /// Opens a write transaction.
    async fn begin(&self) -> StorageResult<Self::Tx>;

    async fn find_booking(&self, id: BookingId) -> StorageResult<Option<Booking>>;

    async fn find_user(&self, id: UserId) -> StorageResult<Option<User>>;

    /// Bookings matching `filter`, in id order.
    async fn list_bookings(&self, filter: &BookingFilter) -> StorageResult<Vec<Booking>>;

    async fn list_rooms(&self) -> StorageResult<Vec<Room>>;

    /// Blocking bookings of any room whose stay overlaps `stay`.
    async fn blocking_bookings_in(&self, stay: &StayRange) -> StorageResult<Vec<Booking>>;
}
