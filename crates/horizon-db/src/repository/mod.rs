//! # Repository Module
//!
//! Database repository implementations for Horizon.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  API command                                                           │
//! │       │                                                                 │
//! │       │  db.rooms().by_status(RoomStatus::Available)                   │
//! │       ▼                                                                 │
//! │  RoomRepository / UserRepository / BookingRepository                   │
//! │       │                                                                 │
//! │       │  each query is a free function generic over the executor,      │
//! │       │  so the same SQL runs on the pool or inside a transaction      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`RoomRepository`](room::RoomRepository) - Room catalog CRUD
//! - [`UserRepository`](user::UserRepository) - User directory
//! - [`BookingRepository`](booking::BookingRepository) - Booking reads and raw inserts

pub mod booking;
pub mod room;
pub mod user;
