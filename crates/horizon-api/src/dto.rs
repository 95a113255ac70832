//! # Data Transfer Objects
//!
//! Request and response shapes for the commands. Field names are camelCase
//! on the wire; enums use their SCREAMING_SNAKE_CASE names.
//!
//! ## Booking Projection
//! ```text
//! Booking { room_id: 3, user_id: 8, .. }
//!      │
//!      │  rooms.get_many([3, ..])   users.get_many([8, ..])
//!      ▼
//! BookingResponse { roomId: 3, roomNumber: "101", userId: 8,
//!                   userFullName: "Ana Petrovska", totalPrice: 30000, .. }
//! ```

use chrono::{DateTime, NaiveDate, Utc};
use horizon_core::availability::AvailabilityQuery;
use horizon_core::validation::validate_new_room;
use horizon_core::{
    Booking, BookingFilter, BookingId, BookingStatus, Money, NewRoom, Role, Room, RoomId,
    RoomStatus, RoomType, User, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

// =============================================================================
// Rooms
// =============================================================================

/// Room create / update payload.
///
/// `pricePerNight` is a decimal string ("100", "89.5", "89.50"); more than
/// two fraction digits is rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: i32,
    pub price_per_night: String,
    /// Defaults to AVAILABLE.
    #[serde(default)]
    pub status: Option<RoomStatus>,
    #[serde(default)]
    pub description: Option<String>,
}

impl RoomRequest {
    /// Parses the price and applies the room field rules.
    pub fn into_new_room(self) -> ApiResult<NewRoom> {
        let price_per_night: Money =
            self.price_per_night
                .parse()
                .map_err(|err| match err {
                    ValidationError::InvalidFormat { reason, .. } => {
                        ValidationError::InvalidFormat {
                            field: "pricePerNight".to_string(),
                            reason,
                        }
                    }
                    other => other,
                })?;

        let room = NewRoom {
            room_number: self.room_number.trim().to_string(),
            room_type: self.room_type,
            capacity: self.capacity,
            price_per_night,
            status: self.status.unwrap_or_default(),
            description: self
                .description
                .map(|text| text.trim().to_string())
                .filter(|text| !text.is_empty()),
        };

        validate_new_room(&room)?;
        Ok(room)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: RoomId,
    pub room_number: String,
    #[serde(rename = "type")]
    pub room_type: RoomType,
    pub capacity: i32,
    /// Nightly rate in cents.
    pub price_per_night: i64,
    /// Nightly rate for display ("100.00").
    pub price_per_night_display: String,
    pub status: RoomStatus,
    pub description: Option<String>,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        RoomResponse {
            id: room.id,
            room_number: room.room_number,
            room_type: room.room_type,
            capacity: room.capacity,
            price_per_night: room.price_per_night.cents(),
            price_per_night_display: room.price_per_night.to_string(),
            status: room.status,
            description: room.description,
        }
    }
}

/// "Which rooms are free" search.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityRequest {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: Option<i32>,
    #[serde(rename = "type")]
    pub room_type: Option<RoomType>,
}

impl AvailabilityRequest {
    pub fn to_query(&self) -> ApiResult<AvailabilityQuery> {
        Ok(AvailabilityQuery::new(
            self.check_in,
            self.check_out,
            self.guests,
            self.room_type,
        )?)
    }
}

// =============================================================================
// Users
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub full_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user. The password hash never leaves the db layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            id: user.id,
            full_name: user.full_name,
            email: user.email,
            role: user.role,
        }
    }
}

// =============================================================================
// Bookings
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub room_id: RoomId,
    pub user_id: UserId,
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl CreateBookingRequest {
    /// Both dates, or a `Required` validation error naming the missing one.
    pub fn dates(&self) -> ApiResult<(NaiveDate, NaiveDate)> {
        let required = |field: &str| -> ApiError {
            ValidationError::Required {
                field: field.to_string(),
            }
            .into()
        };

        let check_in = self.check_in.ok_or_else(|| required("checkIn"))?;
        let check_out = self.check_out.ok_or_else(|| required("checkOut"))?;
        Ok((check_in, check_out))
    }
}

/// Booking list filter and sort.
///
/// `sortField`: checkin | checkout | price | createdAt | status | default.
/// `sortDirection`: asc | desc. Both are case-insensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub user_id: Option<UserId>,
    pub room_id: Option<RoomId>,
    pub status: Option<BookingStatus>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
}

impl BookingListQuery {
    pub fn filter(&self) -> BookingFilter {
        BookingFilter {
            user_id: self.user_id,
            room_id: self.room_id,
            status: self.status,
        }
    }
}

/// Booking joined with its room number and guest name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub user_id: UserId,
    pub user_full_name: String,
    pub room_id: RoomId,
    pub room_number: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub status: BookingStatus,
    /// Total in cents, fixed at creation.
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
}

impl BookingResponse {
    /// Projects `bookings` (order kept) using the given rooms and users.
    ///
    /// A booking whose room or user is missing from the lookups gets an
    /// empty number / name.
    pub fn project(bookings: Vec<Booking>, rooms: &[Room], users: &[User]) -> Vec<BookingResponse> {
        let room_numbers: HashMap<RoomId, &str> = rooms
            .iter()
            .map(|room| (room.id, room.room_number.as_str()))
            .collect();
        let user_names: HashMap<UserId, &str> = users
            .iter()
            .map(|user| (user.id, user.full_name.as_str()))
            .collect();

        bookings
            .into_iter()
            .map(|booking| BookingResponse {
                id: booking.id,
                user_id: booking.user_id,
                user_full_name: user_names
                    .get(&booking.user_id)
                    .map(|name| name.to_string())
                    .unwrap_or_default(),
                room_id: booking.room_id,
                room_number: room_numbers
                    .get(&booking.room_id)
                    .map(|number| number.to_string())
                    .unwrap_or_default(),
                check_in: booking.check_in,
                check_out: booking.check_out,
                status: booking.status,
                total_price: booking.total_price.cents(),
                created_at: booking.created_at,
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
