//! # API Shared
//!
//! Shared wire definitions for the bloodlink APIs.
//!
//! Contains:
//! - JSON request/response DTOs (`dto` module), each with a utoipa schema
//! - Conversions from core domain types into those DTOs
//! - Shared services like `HealthService`

pub mod dto;
pub mod health;

pub use dto::*;
pub use health::HealthService;
