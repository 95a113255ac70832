//! # Booking Manager
//!
//! Transactional orchestration of the booking lifecycle over a
//! `BookingStore`.
//!
//! ## Create Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  create(room_id, user_id, check_in, check_out)                         │
//! │      │                                                                  │
//! │      ├── begin()                                                        │
//! │      ├── find_room ─────────────► RoomNotFound                         │
//! │      ├── find_user ─────────────► UserNotFound                         │
//! │      ├── StayRange::new ────────► InvalidRange                         │
//! │      ├── overlapping_blocking                                           │
//! │      ├── prepare_booking ───────► Conflict                             │
//! │      ├── insert_booking ────────► Conflict (store guard)               │
//! │      └── commit() ──────────────► Booking (PENDING, priced)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutation is one store transaction; an early return drops it and
//! nothing is written.

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};

use crate::availability::{self, AvailabilityQuery};
use crate::error::{CoreError, CoreResult};
use crate::lifecycle::{self, TransitionPolicy};
use crate::ports::{BookingFilter, BookingStore, BookingTx};
use crate::sorting::{self, SortDirection, SortField};
use crate::types::{Booking, BookingId, BookingStatus, Room, RoomId, StayRange, UserId};

/// Entry point for booking operations.
#[derive(Debug, Clone)]
pub struct BookingManager<S> {
    store: S,
    policy: TransitionPolicy,
}

impl<S: BookingStore> BookingManager<S> {
    pub fn new(store: S, policy: TransitionPolicy) -> Self {
        BookingManager { store, policy }
    }

    pub fn policy(&self) -> TransitionPolicy {
        self.policy
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Books `room_id` for `user_id` over `[check_in, check_out)`.
    ///
    /// ## Errors
    /// - `RoomNotFound`, then `UserNotFound`
    /// - `InvalidRange` if `check_in >= check_out`
    /// - `Conflict` if a PENDING/CONFIRMED booking overlaps the stay
    pub async fn create(
        &self,
        room_id: RoomId,
        user_id: UserId,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> CoreResult<Booking> {
        debug!(room_id, user_id, %check_in, %check_out, "Creating booking");

        let mut tx = self.store.begin().await?;

        let room = tx
            .find_room(room_id)
            .await?
            .ok_or(CoreError::RoomNotFound(room_id))?;
        let user = tx
            .find_user(user_id)
            .await?
            .ok_or(CoreError::UserNotFound(user_id))?;

        let stay = StayRange::new(check_in, check_out)?;
        let existing = tx.overlapping_blocking(room_id, &stay).await?;

        let new = lifecycle::prepare_booking(&room, &user, stay, &existing, Utc::now())
            .map_err(|err| {
                if matches!(err, CoreError::Conflict { .. }) {
                    warn!(room_id, %check_in, %check_out, "Booking rejected: room already booked");
                }
                err
            })?;

        let booking = tx.insert_booking(&new).await?;
        tx.commit().await?;

        info!(
            booking_id = booking.id,
            room_id,
            user_id,
            total = %booking.total_price,
            "Booking created"
        );
        Ok(booking)
    }

    /// Cancels a booking. Cancelling a cancelled booking returns it as is.
    pub async fn cancel(&self, booking_id: BookingId) -> CoreResult<Booking> {
        let mut tx = self.store.begin().await?;

        let booking = tx
            .find_booking(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))?;

        if booking.status == BookingStatus::Cancelled {
            debug!(booking_id, "Booking already cancelled");
            return Ok(booking);
        }

        let updated = tx.update_status(booking_id, BookingStatus::Cancelled).await?;
        tx.commit().await?;

        info!(booking_id, from = %booking.status, "Booking cancelled");
        Ok(updated)
    }

    /// Moves a booking to `status` under the manager's `TransitionPolicy`.
    ///
    /// ## Errors
    /// - `BookingNotFound`
    /// - `IllegalTransition` (strict policy only)
    /// - `Conflict` when reactivating a cancelled booking whose slot is taken
    pub async fn set_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> CoreResult<Booking> {
        let mut tx = self.store.begin().await?;

        let booking = tx
            .find_booking(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))?;

        lifecycle::check_transition(self.policy, &booking, status).map_err(|err| {
            warn!(booking_id, from = %booking.status, to = %status, "Transition refused");
            err
        })?;

        if booking.status == status {
            return Ok(booking);
        }

        if lifecycle::needs_overlap_check(booking.status, status) {
            let others = tx
                .overlapping_blocking(booking.room_id, &booking.stay())
                .await?;
            lifecycle::check_reactivation(&booking, status, &others).map_err(|err| {
                warn!(booking_id, room_id = booking.room_id, "Reactivation rejected: room already booked");
                err
            })?;
        }

        let updated = tx.update_status(booking_id, status).await?;
        tx.commit().await?;

        info!(booking_id, from = %booking.status, to = %status, "Booking status changed");
        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub async fn get(&self, booking_id: BookingId) -> CoreResult<Booking> {
        self.store
            .find_booking(booking_id)
            .await?
            .ok_or(CoreError::BookingNotFound(booking_id))
    }

    /// Lists bookings matching `filter`, optionally sorted.
    ///
    /// Without sort parameters the store order (by id) is kept. A filter on
    /// a user that does not exist fails with `UserNotFound`.
    pub async fn list(
        &self,
        filter: BookingFilter,
        sort_field: Option<&str>,
        sort_direction: Option<&str>,
    ) -> CoreResult<Vec<Booking>> {
        let field = sort_field.map(str::parse::<SortField>).transpose()?;
        let direction = sort_direction
            .map(str::parse::<SortDirection>)
            .transpose()?;

        if let Some(user_id) = filter.user_id {
            if self.store.find_user(user_id).await?.is_none() {
                return Err(CoreError::UserNotFound(user_id));
            }
        }

        let mut bookings = self.store.list_bookings(&filter).await?;
        if field.is_some() || direction.is_some() {
            sorting::sort_bookings(
                &mut bookings,
                field.unwrap_or_default(),
                direction.unwrap_or_default(),
            );
        }

        debug!(count = bookings.len(), ?filter, "Listed bookings");
        Ok(bookings)
    }

    /// Rooms free for the query's stay, ordered by room number.
    pub async fn available_rooms(&self, query: &AvailabilityQuery) -> CoreResult<Vec<Room>> {
        let rooms = self.store.list_rooms().await?;
        let bookings = self.store.blocking_bookings_in(&query.stay).await?;
        Ok(availability::available_rooms(rooms, &bookings, query))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;
    use crate::testing::MemoryStore;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, day).unwrap()
    }

    async fn setup(policy: TransitionPolicy) -> (BookingManager<MemoryStore>, MemoryStore) {
        let store = MemoryStore::default();
        store.add_room(1, "101", 10_000, 2).await;
        store.add_room(2, "102", 15_000, 4).await;
        store.add_user(1, "Ana").await;
        store.add_user(2, "Boris").await;
        (BookingManager::new(store.clone(), policy), store)
    }

    #[tokio::test]
    async fn test_create_prices_and_pends() {
        let (manager, store) = setup(TransitionPolicy::default()).await;

        let booking = manager.create(1, 1, d(6, 1), d(6, 4)).await.unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, Money::from_cents(30_000));
        assert_eq!(booking.total_price.to_string(), "300.00");
        assert_eq!(store.bookings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_overlap_conflicts_for_any_user() {
        let (manager, store) = setup(TransitionPolicy::default()).await;
        manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();

        for (from, to) in [(d(6, 3), d(6, 7)), (d(5, 30), d(6, 2)), (d(6, 2), d(6, 3))] {
            let err = manager.create(1, 2, from, to).await.unwrap_err();
            assert!(matches!(err, CoreError::Conflict { room_id: 1, .. }));
        }

        // Same range on another room is fine
        manager.create(2, 2, d(6, 1), d(6, 5)).await.unwrap();
        assert_eq!(store.bookings().await.len(), 2);
    }

    #[tokio::test]
    async fn test_adjacent_stays_both_succeed() {
        let (manager, _) = setup(TransitionPolicy::default()).await;
        manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();
        manager.create(1, 2, d(6, 5), d(6, 10)).await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_range() {
        let (manager, store) = setup(TransitionPolicy::default()).await;

        let err = manager.create(1, 1, d(6, 5), d(6, 5)).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
        let err = manager.create(1, 1, d(6, 6), d(6, 5)).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidRange { .. }));
        assert!(store.bookings().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_room_checked_before_user() {
        let (manager, _) = setup(TransitionPolicy::default()).await;

        let err = manager.create(99, 99, d(6, 1), d(6, 2)).await.unwrap_err();
        assert!(matches!(err, CoreError::RoomNotFound(99)));
        let err = manager.create(1, 99, d(6, 1), d(6, 2)).await.unwrap_err();
        assert!(matches!(err, CoreError::UserNotFound(99)));
    }

    #[tokio::test]
    async fn test_cancel_frees_the_slot_and_is_idempotent() {
        let (manager, _) = setup(TransitionPolicy::default()).await;
        let booking = manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();

        let first = manager.cancel(booking.id).await.unwrap();
        let second = manager.cancel(booking.id).await.unwrap();
        assert_eq!(first.status, BookingStatus::Cancelled);
        assert_eq!(second.status, BookingStatus::Cancelled);

        manager.create(1, 2, d(6, 1), d(6, 5)).await.unwrap();
    }

    #[tokio::test]
    async fn test_cancel_unknown_booking() {
        let (manager, _) = setup(TransitionPolicy::default()).await;
        assert!(matches!(
            manager.cancel(42).await,
            Err(CoreError::BookingNotFound(42))
        ));
        assert!(manager.get(42).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_concurrent_creates_only_one_wins() {
        let (manager, store) = setup(TransitionPolicy::default()).await;

        let (a, b) = tokio::join!(
            manager.create(1, 1, d(6, 1), d(6, 5)),
            manager.create(1, 2, d(6, 3), d(6, 8)),
        );

        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);
        let loser = if a.is_err() { a } else { b };
        assert!(matches!(loser, Err(CoreError::Conflict { .. })));
        assert_eq!(store.bookings().await.len(), 1);
    }

    #[tokio::test]
    async fn test_permissive_policy_allows_any_move() {
        let (manager, _) = setup(TransitionPolicy::Permissive).await;
        let booking = manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();

        manager.set_status(booking.id, BookingStatus::Confirmed).await.unwrap();
        let back = manager.set_status(booking.id, BookingStatus::Pending).await.unwrap();
        assert_eq!(back.status, BookingStatus::Pending);

        manager.cancel(booking.id).await.unwrap();
        let revived = manager.set_status(booking.id, BookingStatus::Confirmed).await.unwrap();
        assert_eq!(revived.status, BookingStatus::Confirmed);
    }

    #[tokio::test]
    async fn test_strict_policy_refuses_illegal_moves() {
        let (manager, store) = setup(TransitionPolicy::Strict).await;
        let booking = manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();

        manager.set_status(booking.id, BookingStatus::Confirmed).await.unwrap();
        let err = manager
            .set_status(booking.id, BookingStatus::Pending)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::IllegalTransition { .. }));

        manager.cancel(booking.id).await.unwrap();
        let err = manager
            .set_status(booking.id, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::IllegalTransition { .. }));
        assert_eq!(store.bookings().await[0].status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_reactivation_conflict() {
        let (manager, store) = setup(TransitionPolicy::Permissive).await;
        let first = manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();
        manager.cancel(first.id).await.unwrap();
        manager.create(1, 2, d(6, 3), d(6, 6)).await.unwrap();

        let err = manager
            .set_status(first.id, BookingStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Conflict { .. }));
        assert_eq!(store.bookings().await[0].status, BookingStatus::Cancelled);
    }

    #[tokio::test]
    async fn test_list_filters_and_sorts() {
        let (manager, _) = setup(TransitionPolicy::default()).await;
        let late = manager.create(1, 1, d(7, 1), d(7, 3)).await.unwrap();
        let early = manager.create(2, 1, d(6, 15), d(6, 16)).await.unwrap();
        let other = manager.create(1, 2, d(6, 15), d(6, 17)).await.unwrap();

        let all = manager.list(BookingFilter::default(), None, None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![late.id, early.id, other.id]);

        let mine = manager
            .list(BookingFilter::for_user(1), Some("checkin"), Some("asc"))
            .await
            .unwrap();
        let ids: Vec<_> = mine.iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![early.id, late.id]);

        let desc = manager
            .list(BookingFilter::default(), Some("price"), Some("desc"))
            .await
            .unwrap();
        assert_eq!(desc[0].id, late.id);
    }

    #[tokio::test]
    async fn test_list_rejects_bad_sort_and_unknown_user() {
        let (manager, _) = setup(TransitionPolicy::default()).await;

        let err = manager
            .list(BookingFilter::default(), Some("bogus"), Some("asc"))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument(ref msg) if msg.contains("bogus")));

        let err = manager
            .list(BookingFilter::for_user(77), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::UserNotFound(77)));
    }

    #[tokio::test]
    async fn test_available_rooms() {
        let (manager, _) = setup(TransitionPolicy::default()).await;
        manager.create(1, 1, d(6, 1), d(6, 5)).await.unwrap();

        let query = AvailabilityQuery::new(Some(d(6, 2)), Some(d(6, 3)), None, None).unwrap();
        let free = manager.available_rooms(&query).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "102");

        let query = AvailabilityQuery::new(Some(d(6, 5)), Some(d(6, 6)), Some(3), None).unwrap();
        let free = manager.available_rooms(&query).await.unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "102");
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let (manager, store) = setup(TransitionPolicy::default()).await;
        store.set_offline(true).await;

        let err = manager.create(1, 1, d(6, 1), d(6, 2)).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(_)));
    }
}
