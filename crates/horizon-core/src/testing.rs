//! In-memory `BookingStore` for manager tests.
//!
//! A transaction holds the state lock for its whole lifetime and works on a
//! copy; `commit` swaps the copy in, dropping the transaction discards it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::availability::blocks;
use crate::money::Money;
use crate::ports::{BookingFilter, BookingStore, BookingTx, StorageError, StorageResult};
use crate::types::{
    Booking, BookingId, BookingStatus, NewBooking, Role, Room, RoomId, RoomStatus, RoomType,
    StayRange, User, UserId,
};

#[derive(Debug, Clone, Default)]
pub(crate) struct State {
    rooms: Vec<Room>,
    users: Vec<User>,
    bookings: Vec<Booking>,
    next_booking_id: BookingId,
    offline: bool,
}

impl State {
    fn booking(&self, id: BookingId) -> Option<Booking> {
        self.bookings.iter().find(|b| b.id == id).cloned()
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub async fn add_room(&self, id: RoomId, number: &str, cents: i64, capacity: i32) -> Room {
        let room = Room {
            id,
            room_number: number.to_string(),
            room_type: RoomType::Double,
            capacity,
            price_per_night: Money::from_cents(cents),
            status: RoomStatus::Available,
            description: None,
        };
        self.state.lock().await.rooms.push(room.clone());
        room
    }

    pub async fn add_user(&self, id: UserId, name: &str) -> User {
        let user = User {
            id,
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: String::new(),
            role: Role::Client,
            created_at: Utc::now(),
        };
        self.state.lock().await.users.push(user.clone());
        user
    }

    pub async fn bookings(&self) -> Vec<Booking> {
        self.state.lock().await.bookings.clone()
    }

    pub async fn set_offline(&self, offline: bool) {
        self.state.lock().await.offline = offline;
    }
}

pub(crate) struct MemoryTx {
    guard: OwnedMutexGuard<State>,
    work: State,
}

#[async_trait]
impl BookingTx for MemoryTx {
    async fn find_room(&mut self, id: RoomId) -> StorageResult<Option<Room>> {
        Ok(self.work.rooms.iter().find(|r| r.id == id).cloned())
    }

    async fn find_user(&mut self, id: UserId) -> StorageResult<Option<User>> {
        Ok(self.work.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_booking(&mut self, id: BookingId) -> StorageResult<Option<Booking>> {
        Ok(self.work.booking(id))
    }

    async fn overlapping_blocking(
        &mut self,
        room_id: RoomId,
        stay: &StayRange,
    ) -> StorageResult<Vec<Booking>> {
        Ok(self
            .work
            .bookings
            .iter()
            .filter(|b| blocks(b, room_id, stay))
            .cloned()
            .collect())
    }

    async fn insert_booking(&mut self, new: &NewBooking) -> StorageResult<Booking> {
        self.work.next_booking_id += 1;
        let booking = Booking {
            id: self.work.next_booking_id,
            room_id: new.room_id,
            user_id: new.user_id,
            check_in: new.stay.check_in(),
            check_out: new.stay.check_out(),
            status: new.status,
            total_price: new.total_price,
            created_at: new.created_at,
        };
        self.work.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_status(
        &mut self,
        id: BookingId,
        status: BookingStatus,
    ) -> StorageResult<Booking> {
        let booking = self
            .work
            .bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| StorageError::Query(format!("no booking {id}")))?;
        booking.status = status;
        Ok(booking.clone())
    }

    async fn commit(self) -> StorageResult<()> {
        let MemoryTx { mut guard, work } = self;
        *guard = work;
        Ok(())
    }
}

#[async_trait]
impl BookingStore for MemoryStore {
    type Tx = MemoryTx;

    async fn begin(&self) -> StorageResult<MemoryTx> {
        let guard = self.state.clone().lock_owned().await;
        if guard.offline {
            return Err(StorageError::Unavailable("store offline".to_string()));
        }
        let work = guard.clone();
        Ok(MemoryTx { guard, work })
    }

    async fn find_booking(&self, id: BookingId) -> StorageResult<Option<Booking>> {
        Ok(self.state.lock().await.booking(id))
    }

    async fn find_user(&self, id: UserId) -> StorageResult<Option<User>> {
        Ok(self
            .state
            .lock()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn list_bookings(&self, filter: &BookingFilter) -> StorageResult<Vec<Booking>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| filter.matches(b))
            .cloned()
            .collect())
    }

    async fn list_rooms(&self) -> StorageResult<Vec<Room>> {
        Ok(self.state.lock().await.rooms.clone())
    }

    async fn blocking_bookings_in(&self, stay: &StayRange) -> StorageResult<Vec<Booking>> {
        let state = self.state.lock().await;
        Ok(state
            .bookings
            .iter()
            .filter(|b| b.is_blocking() && b.stay().overlaps(stay))
            .cloned()
            .collect())
    }
}
