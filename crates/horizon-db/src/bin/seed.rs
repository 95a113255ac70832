//! # Seed Data Generator
//!
//! Populates a development database with a room catalog and two users.
//!
//! ## Usage
//! ```bash
//! # Seed ./horizon_dev.db
//! cargo run -p horizon-db --bin seed
//!
//! # Specify database path and admin password
//! cargo run -p horizon-db --bin seed -- --db ./data/horizon.db --password s3cret!
//! ```
//!
//! ## Generated Data
//! - Rooms on three floors: singles, doubles and a suite per floor
//! - `admin@seasidehorizon.com` (ADMIN) and `guest@seasidehorizon.com` (CLIENT),
//!   both with the given password

use horizon_core::credentials::hash_password;
use horizon_core::{Money, NewRoom, NewUser, Role, RoomStatus, RoomType};
use horizon_db::{Database, DbConfig};
use std::env;

/// (room type, capacity, nightly rate in cents, description) per slot on a floor.
const FLOOR_LAYOUT: &[(RoomType, i32, i64, &str)] = &[
    (RoomType::Single, 1, 4_500, "Cozy single room facing the garden"),
    (RoomType::Single, 1, 4_900, "Single room with balcony"),
    (RoomType::Double, 2, 7_500, "Double room with queen bed"),
    (RoomType::Double, 2, 8_900, "Double room with lake view"),
    (RoomType::Suite, 4, 18_000, "Suite with living area and lake view"),
];

const FLOORS: u32 = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./horizon_dev.db");
    let mut password = String::from("horizon123");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--password" | "-p" => {
                if i + 1 < args.len() {
                    password = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Horizon Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>          Database file path (default: ./horizon_dev.db)");
                println!("  -p, --password <PASS>    Password for seeded users (default: horizon123)");
                println!("  -h, --help               Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Horizon Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.rooms().list().await?.len();
    if existing > 0 {
        println!("⚠ Database already has {} rooms", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Creating rooms...");

    let mut created = 0;
    for floor in 1..=FLOORS {
        for (slot, (room_type, capacity, cents, description)) in FLOOR_LAYOUT.iter().enumerate() {
            let room = NewRoom {
                room_number: format!("{}{:02}", floor, slot + 1),
                room_type: *room_type,
                capacity: *capacity,
                // Higher floors cost a little more
                price_per_night: Money::from_cents(cents + (floor as i64 - 1) * 500),
                status: RoomStatus::Available,
                description: Some(description.to_string()),
            };

            match db.rooms().insert(&room).await {
                Ok(_) => created += 1,
                Err(e) => eprintln!("Failed to insert room {}: {}", room.room_number, e),
            }
        }
    }
    println!("  Created {} rooms", created);

    println!();
    println!("Creating users...");

    let users = [
        ("Front Desk Admin", "admin@seasidehorizon.com", Role::Admin),
        ("Demo Guest", "guest@seasidehorizon.com", Role::Client),
    ];
    for (full_name, email, role) in users {
        let user = NewUser {
            full_name: full_name.to_string(),
            email: email.to_string(),
            password_hash: hash_password(&password)?,
            role,
        };
        let user = db.users().insert(&user).await?;
        println!("  {} ({:?}) id={}", user.email, user.role, user.id);
    }

    db.close().await;

    println!();
    println!("✓ Seed complete!");
    Ok(())
}
