//! Fixtures shared by the crate's database tests.

use horizon_core::{Money, NewRoom, NewUser, Role, Room, RoomStatus, RoomType, User};

use crate::pool::Database;

pub(crate) async fn seed_room(db: &Database, number: &str, cents: i64) -> Room {
    db.rooms()
        .insert(&NewRoom {
            room_number: number.to_string(),
            room_type: RoomType::Double,
            capacity: 2,
            price_per_night: Money::from_cents(cents),
            status: RoomStatus::Available,
            description: None,
        })
        .await
        .unwrap()
}

pub(crate) async fn seed_user(db: &Database, email: &str) -> User {
    db.users()
        .insert(&NewUser {
            full_name: "Test Guest".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$test".to_string(),
            role: Role::Client,
        })
        .await
        .unwrap()
}
