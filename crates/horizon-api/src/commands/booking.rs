//! # Booking Commands
//!
//! Thin wrappers over `BookingManager` that project results into
//! `BookingResponse`.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Guest picks room 101, 06-01 → 06-04                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  create_booking ──► BookingManager::create (one transaction)           │
//! │       │               room? user? range? overlap? price                 │
//! │       ▼                                                                 │
//! │  PENDING, totalPrice 30000 (3 nights × 100.00)                         │
//! │       │                                                                 │
//! │       ├── set_booking_status(CONFIRMED) ──► CONFIRMED                  │
//! │       └── cancel_booking ────────────────► CANCELLED (room freed)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use horizon_core::{Booking, BookingFilter, BookingId, BookingStatus, UserId};

use crate::dto::{BookingListQuery, BookingResponse, CreateBookingRequest};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Joins bookings with their room numbers and guest names.
async fn project(state: &AppState, bookings: Vec<Booking>) -> ApiResult<Vec<BookingResponse>> {
    let mut room_ids: Vec<_> = bookings.iter().map(|b| b.room_id).collect();
    room_ids.sort_unstable();
    room_ids.dedup();

    let mut user_ids: Vec<_> = bookings.iter().map(|b| b.user_id).collect();
    user_ids.sort_unstable();
    user_ids.dedup();

    let rooms = state.db().rooms().get_many(&room_ids).await?;
    let users = state.db().users().get_many(&user_ids).await?;

    Ok(BookingResponse::project(bookings, &rooms, &users))
}

async fn project_one(state: &AppState, booking: Booking) -> ApiResult<BookingResponse> {
    let id = booking.id;
    project(state, vec![booking])
        .await?
        .pop()
        .ok_or_else(|| ApiError::not_found("Booking", id))
}

/// Creates a PENDING booking priced at nightly rate × nights.
pub async fn create_booking(
    state: &AppState,
    request: CreateBookingRequest,
) -> ApiResult<BookingResponse> {
    let (check_in, check_out) = request.dates()?;
    let booking = state
        .bookings()
        .create(request.room_id, request.user_id, check_in, check_out)
        .await?;
    project_one(state, booking).await
}

pub async fn get_booking(state: &AppState, id: BookingId) -> ApiResult<BookingResponse> {
    let booking = state.bookings().get(id).await?;
    project_one(state, booking).await
}

/// Bookings matching the query's filter, sorted when a sort field or
/// direction is given (id order otherwise).
pub async fn list_bookings(
    state: &AppState,
    query: BookingListQuery,
) -> ApiResult<Vec<BookingResponse>> {
    let bookings = state
        .bookings()
        .list(
            query.filter(),
            query.sort_field.as_deref(),
            query.sort_direction.as_deref(),
        )
        .await?;
    project(state, bookings).await
}

/// A user's bookings in natural order (check-in, then creation).
pub async fn bookings_for_user(
    state: &AppState,
    user_id: UserId,
) -> ApiResult<Vec<BookingResponse>> {
    let bookings = state
        .bookings()
        .list(BookingFilter::for_user(user_id), Some("default"), None)
        .await?;
    project(state, bookings).await
}

pub async fn bookings_by_status(
    state: &AppState,
    status: BookingStatus,
) -> ApiResult<Vec<BookingResponse>> {
    let filter = BookingFilter::default().with_status(status);
    let bookings = state.bookings().list(filter, None, None).await?;
    project(state, bookings).await
}

/// Cancels a booking. Cancelling an already-cancelled booking succeeds.
pub async fn cancel_booking(state: &AppState, id: BookingId) -> ApiResult<BookingResponse> {
    let booking = state.bookings().cancel(id).await?;
    project_one(state, booking).await
}

/// Sets a booking's status under the configured transition policy.
pub async fn set_booking_status(
    state: &AppState,
    id: BookingId,
    status: BookingStatus,
) -> ApiResult<BookingResponse> {
    let booking = state.bookings().set_status(id, status).await?;
    project_one(state, booking).await
}
