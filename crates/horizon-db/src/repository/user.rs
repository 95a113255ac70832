//! # User Repository
//!
//! The user directory. Emails are stored normalized (trimmed, lowercase)
//! and compared case-insensitively.

use chrono::Utc;
use horizon_core::{NewUser, User, UserId};
use sqlx::{QueryBuilder, Sqlite, SqliteExecutor, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};

const USER_COLUMNS: &str = "id, full_name, email, password_hash, role, created_at";

pub(crate) async fn find_user<'e, E: SqliteExecutor<'e>>(
    executor: E,
    id: UserId,
) -> DbResult<Option<User>> {
    let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1");
    let user = sqlx::query_as::<_, User>(&sql)
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(user)
}

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a user with `created_at = now`.
    ///
    /// ## Errors
    /// `UniqueViolation` if the email is already registered.
    pub async fn insert(&self, user: &NewUser) -> DbResult<User> {
        let sql = format!(
            "INSERT INTO users (full_name, email, password_hash, role, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5) RETURNING {USER_COLUMNS}"
        );
        let created = sqlx::query_as::<_, User>(&sql)
            .bind(user.full_name.trim())
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role)
            .bind(Utc::now())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match DbError::from(e) {
                DbError::UniqueViolation { .. } => DbError::duplicate("email", user.email.clone()),
                other => other,
            })?;

        info!(user_id = created.id, role = ?created.role, "User registered");
        Ok(created)
    }

    pub async fn get_by_id(&self, id: UserId) -> DbResult<Option<User>> {
        find_user(&self.pool, id).await
    }

    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        debug!("Looking up user by email");

        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1");
        let user = sqlx::query_as::<_, User>(&sql)
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    pub async fn exists_by_email(&self, email: &str) -> DbResult<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1)")
            .bind(email.trim())
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    /// Users with the given id set, in id order. Missing ids are skipped.
    pub async fn get_many(&self, ids: &[UserId]) -> DbResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(*id);
        }
        separated.push_unseparated(") ORDER BY id");

        let users = builder
            .build_query_as::<User>()
            .fetch_all(&self.pool)
            .await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use horizon_core::Role;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            full_name: "Ana Petrovska".to_string(),
            email: email.to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            role: Role::Client,
        }
    }

    async fn repo() -> UserRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().users()
    }

    #[tokio::test]
    async fn test_insert_and_lookup() {
        let repo = repo().await;
        let user = repo.insert(&new_user("ana@seaside.mk")).await.unwrap();

        assert_eq!(user.role, Role::Client);
        assert_eq!(repo.get_by_id(user.id).await.unwrap().unwrap().email, "ana@seaside.mk");
        assert_eq!(
            repo.get_by_email("ANA@seaside.mk").await.unwrap().unwrap().id,
            user.id
        );
        assert!(repo.exists_by_email("ana@seaside.mk").await.unwrap());
        assert!(!repo.exists_by_email("boris@seaside.mk").await.unwrap());
        assert!(repo.get_by_id(999).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_any_case() {
        let repo = repo().await;
        repo.insert(&new_user("ana@seaside.mk")).await.unwrap();

        let err = repo.insert(&new_user("Ana@Seaside.mk")).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { ref field, .. } if field == "email"));
    }

    #[tokio::test]
    async fn test_get_many() {
        let repo = repo().await;
        let a = repo.insert(&new_user("a@seaside.mk")).await.unwrap();
        let b = repo.insert(&new_user("b@seaside.mk")).await.unwrap();

        let users = repo.get_many(&[b.id, a.id]).await.unwrap();
        let ids: Vec<_> = users.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }
}
