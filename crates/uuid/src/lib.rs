//! UUID and sharded-path utilities.
//!
//! Donor records, blood requests and NGO contact requests are stored under sharded directories
//! derived from a UUID.
//!
//! Storage identifiers use a *canonical* representation: **32 lowercase hexadecimal
//! characters** (no hyphens), the same value `Uuid::new_v4().simple().to_string()` produces.
//! Externally supplied identifiers must already be canonical; use [`ShardableUuid::parse`] to
//! validate them.
//!
//! ## Sharded directory layout
//! For a canonical UUID `u`, records live under:
//! `parent_dir/<u[0..2]>/<u[2..4]>/<u>/`
//!
//! Example:
//! `blood_bank_data/donors/55/0e/550e8400e29b41d4a716446655440000/`
//!
//! This keeps any single directory from accumulating every record in the system.

mod service;

pub use service::ShardableUuid;

/// Error type for UUID operations.
#[derive(Debug, thiserror::Error)]
pub enum UuidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for UUID operations.
pub type UuidResult<T> = Result<T, UuidError>;
