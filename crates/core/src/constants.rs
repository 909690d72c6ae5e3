//! Constants used throughout the bloodlink core crate.
//!
//! Path and filename constants live here so every repository agrees on the storage layout.

/// Default directory for record storage when no explicit directory is configured.
pub const DEFAULT_DATA_DIR: &str = "blood_bank_data";

/// Default search radius for donor queries, in kilometres.
pub const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

/// Directory name for donor records.
pub const DONORS_DIR_NAME: &str = "donors";

/// Directory name for blood requests.
pub const REQUESTS_DIR_NAME: &str = "blood_requests";

/// Directory name for NGO contact requests.
pub const NGO_CONTACTS_DIR_NAME: &str = "ngo_contacts";

/// Filename for a donor record.
pub const DONOR_YAML_FILENAME: &str = "donor.yaml";

/// Filename for a blood request record.
pub const REQUEST_YAML_FILENAME: &str = "request.yaml";

/// Filename for an NGO contact request.
pub const NGO_CONTACT_YAML_FILENAME: &str = "contact.yaml";

/// Minimum donor age accepted at registration.
pub const MIN_DONOR_AGE: u32 = 18;

/// Maximum donor age accepted at registration.
pub const MAX_DONOR_AGE: u32 = 65;

/// Minimum donor weight accepted at registration, in kilograms.
pub const MIN_DONOR_WEIGHT_KG: f64 = 50.0;
