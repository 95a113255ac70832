//! # Commands Module
//!
//! Transport-independent async commands. Each takes `&AppState` plus typed
//! arguments and returns `ApiResult<T>`; a transport (HTTP, IPC, CLI) only
//! has to deserialize arguments and serialize the result or `ApiError`.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Horizon Commands                                 │
//! │                                                                         │
//! │  ┌─────────────────────┐  ┌─────────────────────┐                      │
//! │  │  Auth Commands      │  │  Room Commands      │                      │
//! │  │  ─────────────────  │  │  ─────────────────  │                      │
//! │  │  • register         │  │  • list_rooms       │                      │
//! │  │  • login            │  │  • get_room         │                      │
//! │  │  • get_user         │  │  • available_rooms  │                      │
//! │  │                     │  │  • rooms_by_status  │                      │
//! │  │                     │  │  • create_room      │                      │
//! │  │                     │  │  • update_room      │                      │
//! │  │                     │  │  • delete_room      │                      │
//! │  └─────────────────────┘  └─────────────────────┘                      │
//! │                                                                         │
//! │  ┌───────────────────────────────────────────────┐                     │
//! │  │  Booking Commands                             │                     │
//! │  │  ───────────────────────────────────────────  │                     │
//! │  │  • create_booking      • bookings_for_user    │                     │
//! │  │  • get_booking         • bookings_by_status   │                     │
//! │  │  • list_bookings       • cancel_booking       │                     │
//! │  │                        • set_booking_status   │                     │
//! │  └───────────────────────────────────────────────┘                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod booking;
pub mod room;

pub use auth::*;
pub use booking::*;
pub use room::*;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::dto::{RegisterRequest, RoomRequest, RoomResponse, UserResponse};
    use crate::state::AppState;
    use horizon_core::RoomType;

    pub async fn state() -> AppState {
        AppState::in_memory().await.unwrap()
    }

    pub async fn room(state: &AppState, number: &str, price: &str) -> RoomResponse {
        super::create_room(
            state,
            RoomRequest {
                room_number: number.to_string(),
                room_type: RoomType::Double,
                capacity: 2,
                price_per_night: price.to_string(),
                status: None,
                description: None,
            },
        )
        .await
        .unwrap()
    }

    pub async fn user(state: &AppState, full_name: &str, email: &str) -> UserResponse {
        super::register(
            state,
            RegisterRequest {
                full_name: full_name.to_string(),
                email: email.to_string(),
                password: "secret1".to_string(),
            },
        )
        .await
        .unwrap()
    }
}
