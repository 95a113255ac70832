//! # Auth Commands
//!
//! Registration and credential checks against the user directory.
//!
//! ## Registration Flow
//! ```text
//! register({ fullName, email, password })
//!      │
//!      ├─ field rules (name, email shape, password ≥ 6) ── ValidationError
//!      ├─ email taken? (case-insensitive) ──────────────── Conflict
//!      ├─ argon2 hash
//!      ▼
//! users.insert(role = CLIENT) ──► UserResponse
//! ```
//!
//! `login` answers with the user on success; issuing tokens or sessions is
//! left to the transport.

use horizon_core::credentials::{hash_password, verify_password};
use horizon_core::validation::{
    normalize_email, validate_email, validate_full_name, validate_password,
};
use horizon_core::{NewUser, Role, UserId};
use tracing::{info, warn};

use crate::dto::{LoginRequest, RegisterRequest, UserResponse};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Registers a new CLIENT user.
pub async fn register(state: &AppState, request: RegisterRequest) -> ApiResult<UserResponse> {
    validate_full_name(&request.full_name)?;
    validate_email(&request.email)?;
    validate_password(&request.password)?;

    let email = normalize_email(&request.email);
    let users = state.db().users();

    if users.exists_by_email(&email).await? {
        warn!("Registration rejected: email already in use");
        return Err(ApiError::conflict("Email is already in use"));
    }

    let user = users
        .insert(&NewUser {
            full_name: request.full_name.trim().to_string(),
            email,
            password_hash: hash_password(&request.password)?,
            role: Role::Client,
        })
        .await?;

    Ok(user.into())
}

/// Checks credentials. Unknown email and wrong password fail the same way.
pub async fn login(state: &AppState, request: LoginRequest) -> ApiResult<UserResponse> {
    let email = normalize_email(&request.email);

    let user = match state.db().users().get_by_email(&email).await? {
        Some(user) if verify_password(&request.password, &user.password_hash) => user,
        _ => {
            warn!("Login failed");
            return Err(ApiError::unauthorized("Invalid credentials"));
        }
    };

    info!(user_id = user.id, "Login succeeded");
    Ok(user.into())
}

pub async fn get_user(state: &AppState, id: UserId) -> ApiResult<UserResponse> {
    state
        .db()
        .users()
        .get_by_id(id)
        .await?
        .map(UserResponse::from)
        .ok_or_else(|| ApiError::not_found("User", id))
}
