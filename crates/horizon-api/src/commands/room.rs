//! # Room Commands
//!
//! The room catalog and the availability search.
//!
//! ## Availability Search
//! ```text
//! available_rooms({ checkIn: 06-01, checkOut: 06-05, guests: 2, type: DOUBLE })
//!      │
//!      ▼
//! all rooms ── capacity ≥ 2 ── type = DOUBLE ── no PENDING/CONFIRMED
//!                                               booking overlapping
//!                                               [06-01, 06-05)
//!      │
//!      ▼
//! Vec<RoomResponse> ordered by room number
//! ```
//!
//! Room status (AVAILABLE / OCCUPIED / MAINTENANCE) is housekeeping
//! information; it does not hide a room from the search.

use horizon_core::{RoomId, RoomStatus};
use tracing::{info, warn};

use crate::dto::{AvailabilityRequest, RoomRequest, RoomResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

fn into_responses(rooms: Vec<horizon_core::Room>) -> Vec<RoomResponse> {
    rooms.into_iter().map(RoomResponse::from).collect()
}

/// All rooms, by id.
pub async fn list_rooms(state: &AppState) -> ApiResult<Vec<RoomResponse>> {
    Ok(into_responses(state.db().rooms().list().await?))
}

pub async fn get_room(state: &AppState, id: RoomId) -> ApiResult<RoomResponse> {
    state
        .db()
        .rooms()
        .get_by_id(id)
        .await?
        .map(RoomResponse::from)
        .ok_or_else(|| ApiError::not_found("Room", id))
}

/// Rooms free for the requested stay.
pub async fn available_rooms(
    state: &AppState,
    request: AvailabilityRequest,
) -> ApiResult<Vec<RoomResponse>> {
    let query = request.to_query()?;
    let rooms = state.bookings().available_rooms(&query).await?;
    Ok(into_responses(rooms))
}

pub async fn rooms_by_status(state: &AppState, status: RoomStatus) -> ApiResult<Vec<RoomResponse>> {
    Ok(into_responses(state.db().rooms().by_status(status).await?))
}

pub async fn create_room(state: &AppState, request: RoomRequest) -> ApiResult<RoomResponse> {
    let room = request.into_new_room()?;
    Ok(state.db().rooms().insert(&room).await?.into())
}

/// Replaces every field of a room. Bookings already made keep the price
/// they were created with.
pub async fn update_room(
    state: &AppState,
    id: RoomId,
    request: RoomRequest,
) -> ApiResult<RoomResponse> {
    let room = request.into_new_room()?;
    state
        .db()
        .rooms()
        .update(id, &room)
        .await?
        .map(RoomResponse::from)
        .ok_or_else(|| ApiError::not_found("Room", id))
}

/// Deletes a room that no booking (in any status) references.
pub async fn delete_room(state: &AppState, id: RoomId) -> ApiResult<()> {
    let db = state.db();

    if db.bookings().exists_for_room(id).await? {
        warn!(room_id = id, "Room delete refused: bookings reference it");
        return Err(ApiError::conflict(format!(
            "Room {} has bookings and cannot be deleted",
            id
        )));
    }

    // A booking inserted since the check still trips the foreign key (→ Conflict)
    if !db.rooms().delete(id).await? {
        return Err(ApiError::not_found("Room", id));
    }

    info!(room_id = id, "Room removed from catalog");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::booking::create_booking;
    use crate::commands::test_support::{room, state, user};
    use crate::dto::CreateBookingRequest;
    use crate::error::ErrorCode;
    use chrono::NaiveDate;
    use horizon_core::RoomType;

    fn d(day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2025, 6, day)
    }

    fn request(number: &str, room_type: RoomType, capacity: i32, price: &str) -> RoomRequest {
        RoomRequest {
            room_number: number.to_string(),
            room_type,
            capacity,
            price_per_night: price.to_string(),
            status: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_room_crud() {
        let state = state().await;

        let created = create_room(&state, request("101", RoomType::Single, 1, "45"))
            .await
            .unwrap();
        assert_eq!(created.price_per_night, 4_500);
        assert_eq!(created.price_per_night_display, "45.00");
        assert_eq!(created.status, RoomStatus::Available);

        let mut change = request("101", RoomType::Single, 1, "49.90");
        change.status = Some(RoomStatus::Maintenance);
        let updated = update_room(&state, created.id, change).await.unwrap();
        assert_eq!(updated.price_per_night, 4_990);
        assert_eq!(get_room(&state, created.id).await.unwrap(), updated);

        assert_eq!(
            rooms_by_status(&state, RoomStatus::Maintenance).await.unwrap().len(),
            1
        );
        assert!(rooms_by_status(&state, RoomStatus::Available)
            .await
            .unwrap()
            .is_empty());

        delete_room(&state, created.id).await.unwrap();
        assert!(list_rooms(&state).await.unwrap().is_empty());

        let err = delete_room(&state, created.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_duplicate_room_number() {
        let state = state().await;
        room(&state, "101", "100").await;

        let err = create_room(&state, request("101", RoomType::Suite, 4, "180"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert_eq!(err.message, "roomNumber '101' already exists");
    }

    #[tokio::test]
    async fn test_update_missing_room() {
        let state = state().await;
        let err = update_room(&state, 77, request("301", RoomType::Single, 1, "45"))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_room_with_bookings_is_not_deleted() {
        let state = state().await;
        let booked = room(&state, "101", "100").await;
        let ana = user(&state, "Ana Petrovska", "ana@seaside.mk").await;

        let booking = create_booking(
            &state,
            CreateBookingRequest {
                room_id: booked.id,
                user_id: ana.id,
                check_in: d(1),
                check_out: d(3),
            },
        )
        .await
        .unwrap();
        state.bookings().cancel(booking.id).await.unwrap();

        // Cancelled bookings still reference the room
        let err = delete_room(&state, booked.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Conflict);
        assert!(get_room(&state, booked.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_available_rooms() {
        let state = state().await;
        let r101 = room(&state, "101", "100").await;
        let r102 = room(&state, "102", "120").await;
        create_room(&state, request("201", RoomType::Suite, 4, "180"))
            .await
            .unwrap();
        let ana = user(&state, "Ana Petrovska", "ana@seaside.mk").await;

        create_booking(
            &state,
            CreateBookingRequest {
                room_id: r101.id,
                user_id: ana.id,
                check_in: d(1),
                check_out: d(5),
            },
        )
        .await
        .unwrap();

        let search = |check_in, check_out, guests, room_type| AvailabilityRequest {
            check_in,
            check_out,
            guests,
            room_type,
        };

        let free = available_rooms(&state, search(d(3), d(7), None, None))
            .await
            .unwrap();
        let numbers: Vec<_> = free.iter().map(|r| r.room_number.as_str()).collect();
        assert_eq!(numbers, vec!["102", "201"]);

        // Checkout day is free for the next guest
        let free = available_rooms(&state, search(d(5), d(7), Some(2), Some(RoomType::Double)))
            .await
            .unwrap();
        let ids: Vec<_> = free.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![r101.id, r102.id]);

        let free = available_rooms(&state, search(d(1), d(2), Some(3), None))
            .await
            .unwrap();
        assert_eq!(free.len(), 1);
        assert_eq!(free[0].room_number, "201");

        let err = available_rooms(&state, search(d(5), d(5), None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidRange);

        let err = available_rooms(&state, search(None, d(5), None, None))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidArgument);
    }
}
