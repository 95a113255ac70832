//! # Validation Module
//!
//! Input validation for the room catalog and the user directory.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: API command (horizon-api)                                    │
//! │  ├── Type validation (deserialization into DTOs)                       │
//! │  └── THIS MODULE: field rules                                          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: BookingManager (horizon-core)                                │
//! │  └── Range, overlap and transition rules                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── CHECK / UNIQUE / FOREIGN KEY constraints                          │
//! │  └── Overlap triggers                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use horizon_core::validation::{validate_email, validate_password};
//!
//! validate_email("guest@example.com").unwrap();
//! assert!(validate_password("12345").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NewRoom;
use crate::{MAX_ROOM_PRICE_CENTS, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Room Validators
// =============================================================================

/// Validates a room number.
///
/// ## Rules
/// - Must not be empty
/// - At most 20 characters
pub fn validate_room_number(room_number: &str) -> ValidationResult<()> {
    let room_number = room_number.trim();

    if room_number.is_empty() {
        return Err(ValidationError::Required {
            field: "roomNumber".to_string(),
        });
    }

    if room_number.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "roomNumber".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates room capacity (at least one guest).
pub fn validate_capacity(capacity: i32) -> ValidationResult<()> {
    if capacity < 1 {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: 1,
            max: i32::MAX as i64,
        });
    }

    Ok(())
}

/// Validates a nightly rate in cents.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must fit the persisted precision (10 digits, 2 fraction digits)
///
/// ## Example
/// ```rust
/// use horizon_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(10_000).is_ok()); // 100.00
/// assert!(validate_price_cents(0).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "pricePerNight".to_string(),
        });
    }

    if cents > MAX_ROOM_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "pricePerNight".to_string(),
            min: 1,
            max: MAX_ROOM_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates an optional description (at most 1000 characters).
pub fn validate_description(description: Option<&str>) -> ValidationResult<()> {
    match description {
        Some(text) if text.chars().count() > 1000 => Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: 1000,
        }),
        _ => Ok(()),
    }
}

/// Validates every field of a room create/update request.
pub fn validate_new_room(room: &NewRoom) -> ValidationResult<()> {
    validate_room_number(&room.room_number)?;
    validate_capacity(room.capacity)?;
    validate_price_cents(room.price_per_night.cents())?;
    validate_description(room.description.as_deref())?;
    Ok(())
}

// =============================================================================
// User Validators
// =============================================================================

/// Validates a user's full name (1-200 characters).
pub fn validate_full_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "fullName".to_string(),
        });
    }

    if name.chars().count() > 200 {
        return Err(ValidationError::TooLong {
            field: "fullName".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part
/// - Domain contains a dot that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: "must be a valid email address".to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.find('.') {
        Some(0) => Err(invalid()),
        Some(_) if domain.ends_with('.') => Err(invalid()),
        Some(_) => Ok(()),
        None => Err(invalid()),
    }
}

/// Normalizes an email for storage and lookup (trimmed, lowercase).
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates a raw password before hashing.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
