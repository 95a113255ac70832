//! # Room Repository
//!
//! The room catalog.

use horizon_core::{NewRoom, Room, RoomId, RoomStatus};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const ROOM_COLUMNS: &str =
    "id, room_number, room_type, capacity, price_per_night, status, description";

// =============================================================================
// Executor-level queries
// =============================================================================

pub(crate) async fn find_room<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: RoomId,
) -> DbResult<Option<Room>> {
    let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1");
    let room = sqlx::query_as::<_, Room>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(room)
}

pub(crate) async fn list_rooms<'e, E: SqliteExecutor<'e>>(executor: E) -> DbResult<Vec<Room>> {
    let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms ORDER BY id");
    let rooms = sqlx::query_as::<_, Room>(&sql).fetch_all(executor).await?;
    Ok(rooms)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for room database operations.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: SqlitePool,
}

impl RoomRepository {
    /// Creates a new RoomRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RoomRepository { pool }
    }

    /// All rooms, by id.
    pub async fn list(&self) -> DbResult<Vec<Room>> {
        list_rooms(&self.pool).await
    }

    pub async fn get_by_id(&self, id: RoomId) -> DbResult<Option<Room>> {
        find_room(&self.pool, id).await
    }

    /// Rooms with the given id set, in id order. Missing ids are skipped.
    pub async fn get_many(&self, ids: &[RoomId]) -> DbResult<Vec<Room>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let rooms = builder
            .build_query_as::<Room>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    pub async fn by_status(&self, status: RoomStatus) -> DbResult<Vec<Room>> {
        debug!(status = status.as_str(), "Listing rooms by status");

        let sql = format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE status = ?1 ORDER BY id");
        let rooms = sqlx::query_as::<_, Room>(&sql)
            .bind(status)
            .fetch_all(&self.pool)
            .await?;
        Ok(rooms)
    }

    /// Inserts a room.
    ///
    /// ## Errors
    /// `UniqueViolation` if the room number is taken.
    pub async fn insert(&self, room: &NewRoom) -> DbResult<Room> {
        let sql = format!(
            "INSERT INTO rooms (room_number, room_type, capacity, price_per_night, status, description) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6) RETURNING {ROOM_COLUMNS}"
        );
        let created = sqlx::query_as::<_, Room>(&sql)
            .bind(room.room_number.trim())
            .bind(room.room_type)
            .bind(room.capacity)
            .bind(room.price_per_night)
            .bind(room.status)
            .bind(room.description.as_deref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| duplicate_number(e, &room.room_number))?;

        info!(room_id = created.id, room_number = %created.room_number, "Room created");
        Ok(created)
    }

    /// Replaces every field of room `id`. Existing bookings keep their price.
    ///
    /// Returns `None` if the room doesn't exist.
    pub async fn update(&self, id: RoomId, room: &NewRoom) -> DbResult<Option<Room>> {
        let sql = format!(
            "UPDATE rooms SET room_number = ?1, room_type = ?2, capacity = ?3, \
             price_per_night = ?4, status = ?5, description = ?6 \
             WHERE id = ?7 RETURNING {ROOM_COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Room>(&sql)
            .bind(room.room_number.trim())
            .bind(room.room_type)
            .bind(room.capacity)
            .bind(room.price_per_night)
            .bind(room.status)
            .bind(room.description.as_deref())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| duplicate_number(e, &room.room_number))?;

        if updated.is_some() {
            info!(room_id = id, "Room updated");
        }
        Ok(updated)
    }

    /// Deletes room `id`. Returns false if it didn't exist.
    ///
    /// ## Errors
    /// `ForeignKeyViolation` while any booking references the room.
    pub async fn delete(&self, id: RoomId) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            info!(room_id = id, "Room deleted");
        }
        Ok(deleted)
    }
}

fn duplicate_number(err: sqlx::Error, room_number: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("roomNumber", room_number.trim()),
        other => other,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
