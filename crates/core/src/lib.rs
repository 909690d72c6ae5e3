//! # Bloodlink Core
//!
//! Donor matching for the bloodlink blood-bank system.
//!
//! The heart of the crate is pure computation over an in-memory donor snapshot:
//! - [`compatibility`]: which donor blood types may give to a requested type
//! - [`geo`]: coordinates and haversine distance
//! - [`matcher`]: radius filter and nearest-first ordering ([`find_matches`])
//!
//! Around it sit the collaborators that feed and use it:
//! - [`directory`]: the [`DonorDirectory`] seam the matcher's callers load snapshots from
//! - [`matching`]: the untyped "nearby" and typed "nearest compatible" queries
//! - [`repositories`]: sharded YAML storage for donors, blood requests and NGO contacts
//!
//! **No API concerns**: HTTP routing, wire DTOs and OpenAPI live in `api-rest` and `api-shared`.

pub mod compatibility;
pub mod config;
pub mod constants;
pub mod directory;
pub mod error;
pub mod geo;
pub mod matcher;
pub mod matching;
pub mod repositories;
pub mod validation;

pub use bloodlink_types::{EmailAddress, NonEmptyText, TextError};
pub use bloodlink_uuid::ShardableUuid;

pub use compatibility::{compatible_types, BloodGroup, BloodType};
pub use config::CoreConfig;
pub use constants::{DEFAULT_DATA_DIR, DEFAULT_MAX_DISTANCE_KM};
pub use directory::{DonorDirectory, InMemoryDirectory};
pub use error::{CoreError, CoreResult};
pub use geo::{haversine_km, Coordinate};
pub use matcher::{find_matches, DonorRecord, MatchResult};
pub use matching::{nearby_donors, nearest_compatible_donors};
pub use repositories::donors::{Donor, DonorProfile, DonorRegistration, DonorService};
pub use repositories::ngo::{NewNgoContact, NgoContact, NgoInfo, NgoService};
pub use repositories::requests::{
    BloodRequest, BloodRequestService, NewBloodRequest, RequestStatus, Urgency,
};
