//! Donor registration and the file-backed donor directory.
//!
//! Donors are stored as YAML files in a sharded structure:
//!
//! ```text
//! donors/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         donor.yaml
//! ```
//!
//! [`DonorService`] is the storage collaborator for matching: it implements
//! [`DonorDirectory`] and is the only place that validates donor blood types, so every stored
//! record carries one of the eight canonical codes.

use crate::compatibility::BloodType;
use crate::config::CoreConfig;
use crate::constants::{
    DONOR_YAML_FILENAME, MAX_DONOR_AGE, MIN_DONOR_AGE, MIN_DONOR_WEIGHT_KG,
};
use crate::directory::DonorDirectory;
use crate::error::{CoreError, CoreResult};
use crate::geo::Coordinate;
use crate::matcher::DonorRecord;
use crate::repositories::shared::{
    create_uuid_and_shard_dir, read_sharded_records, read_sharded_records_strict,
    write_yaml_record,
};
use crate::{EmailAddress, NonEmptyText};
use bloodlink_uuid::ShardableUuid;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::{Arc, Mutex};

/// Donor attributes that matching carries through without inspecting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonorProfile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub age: u32,
    pub weight_kg: f64,
    pub address: String,
    pub last_donation_date: Option<NaiveDate>,
    pub medical_conditions: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A donor as held by the directory.
pub type Donor = DonorRecord<DonorProfile>;

/// Unvalidated registration input, as received from the API or CLI.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DonorRegistration {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_type: String,
    pub age: u32,
    pub weight_kg: f64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_donation_date: Option<String>,
    pub medical_conditions: Option<String>,
}

/// On-disk shape of `donor.yaml`. The identifier is the directory name.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDonor {
    name: String,
    email: String,
    phone: String,
    blood_type: BloodType,
    age: u32,
    weight_kg: f64,
    address: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    last_donation_date: Option<NaiveDate>,
    #[serde(default)]
    medical_conditions: Option<String>,
    registered_at: DateTime<Utc>,
}

/// The only field the duplicate-email check needs from `donor.yaml`.
#[derive(Deserialize)]
struct EmailOnly {
    email: String,
}

impl StoredDonor {
    fn into_donor(self, id: String) -> Donor {
        DonorRecord {
            id,
            blood_type: self.blood_type,
            coordinate: Coordinate::new(self.latitude, self.longitude),
            profile: DonorProfile {
                name: self.name,
                email: self.email,
                phone: self.phone,
                age: self.age,
                weight_kg: self.weight_kg,
                address: self.address,
                last_donation_date: self.last_donation_date,
                medical_conditions: self.medical_conditions,
                registered_at: self.registered_at,
            },
        }
    }
}

/// Parses an optional `YYYY-MM-DD` date, treating blank input as absent.
pub(crate) fn parse_optional_date(field: &str, value: Option<&str>) -> CoreResult<Option<NaiveDate>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => NaiveDate::parse_from_str(v, "%Y-%m-%d").map(Some).map_err(|e| {
            CoreError::InvalidInput(format!("{field} must be YYYY-MM-DD, got '{v}': {e}"))
        }),
    }
}

/// Registration, lookup and listing of donors.
#[derive(Clone, Debug)]
pub struct DonorService {
    cfg: Arc<CoreConfig>,
    write_lock: Arc<Mutex<()>>,
}

impl DonorService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Registers a new donor, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if:
    /// - any field fails validation (see [`DonorService::register_at`]),
    /// - the email is already registered ([`CoreError::DuplicateEmail`]),
    /// - an existing donor file cannot be read or has no readable email,
    /// - the record cannot be written.
    pub fn register(&self, registration: DonorRegistration) -> CoreResult<Donor> {
        self.register_at(registration, Utc::now())
    }

    /// Registers a new donor with an explicit registration timestamp.
    ///
    /// Validation applied:
    /// - `name`, `phone`, `address` must be non-blank,
    /// - `email` must be a plausible address and not already registered (case-insensitive),
    /// - `blood_type` must be one of the eight canonical codes,
    /// - `age` within 18..=65 and `weight_kg` at least 50,
    /// - coordinates within range,
    /// - `last_donation_date`, if present, in `YYYY-MM-DD` form.
    pub fn register_at(
        &self,
        registration: DonorRegistration,
        registered_at: DateTime<Utc>,
    ) -> CoreResult<Donor> {
        let name = NonEmptyText::new(&registration.name)?;
        let email = EmailAddress::parse(&registration.email)?;
        let phone = NonEmptyText::new(&registration.phone)?;
        let address = NonEmptyText::new(&registration.address)?;

        let blood_type = BloodType::parse(registration.blood_type.trim());
        if !blood_type.is_canonical() {
            return Err(CoreError::InvalidInput(format!(
                "blood_type must be one of A+, A-, B+, B-, AB+, AB-, O+, O-, got '{}'",
                registration.blood_type
            )));
        }

        if !(MIN_DONOR_AGE..=MAX_DONOR_AGE).contains(&registration.age) {
            return Err(CoreError::InvalidInput(format!(
                "age must be between {MIN_DONOR_AGE} and {MAX_DONOR_AGE}, got {}",
                registration.age
            )));
        }
        if !registration.weight_kg.is_finite() || registration.weight_kg < MIN_DONOR_WEIGHT_KG {
            return Err(CoreError::InvalidInput(format!(
                "weight must be at least {MIN_DONOR_WEIGHT_KG} kg, got {}",
                registration.weight_kg
            )));
        }

        let coordinate = Coordinate::new(registration.latitude, registration.longitude);
        coordinate.validate()?;

        let last_donation_date = parse_optional_date(
            "last_donation_date",
            registration.last_donation_date.as_deref(),
        )?;
        let medical_conditions = registration
            .medical_conditions
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty());

        let stored = StoredDonor {
            name: name.into_inner(),
            email: email.as_str().to_string(),
            phone: phone.into_inner(),
            blood_type,
            age: registration.age,
            weight_kg: registration.weight_kg,
            address: address.into_inner(),
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            last_donation_date,
            medical_conditions,
            registered_at,
        };

        let _guard = self.write_lock.lock().map_err(|_| CoreError::LockPoisoned)?;

        let existing =
            read_sharded_records_strict::<EmailOnly>(&self.cfg.donors_dir(), DONOR_YAML_FILENAME)?;
        if existing.iter().any(|(_, donor)| email.matches(&donor.email)) {
            return Err(CoreError::DuplicateEmail(email.to_string()));
        }

        let donors_dir = self.cfg.donors_dir();
        fs::create_dir_all(&donors_dir).map_err(CoreError::StorageDirCreation)?;
        let (id, record_dir) = create_uuid_and_shard_dir(&donors_dir, ShardableUuid::new)?;
        write_yaml_record(&record_dir, DONOR_YAML_FILENAME, &stored)?;

        tracing::info!(donor_id = %id, blood_type = %stored.blood_type, "donor registered");
        Ok(stored.into_donor(id.to_string()))
    }

    /// All donors, ordered by registration time and then identifier.
    pub fn list_donors(&self) -> CoreResult<Vec<Donor>> {
        let mut donors: Vec<Donor> =
            read_sharded_records::<StoredDonor>(&self.cfg.donors_dir(), DONOR_YAML_FILENAME)
                .into_iter()
                .map(|(id, stored)| stored.into_donor(id))
                .collect();

        donors.sort_by(|a, b| {
            a.profile
                .registered_at
                .cmp(&b.profile.registered_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(donors)
    }

    /// Looks up a single donor by canonical identifier.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Uuid` for a non-canonical identifier and
    /// `CoreError::DonorNotFound` if no record exists.
    pub fn get(&self, donor_id: &str) -> CoreResult<Donor> {
        let id: ShardableUuid = donor_id.parse()?;
        let path = id
            .sharded_dir(&self.cfg.donors_dir())
            .join(DONOR_YAML_FILENAME);

        if !path.is_file() {
            return Err(CoreError::DonorNotFound(donor_id.to_string()));
        }

        let contents = fs::read_to_string(&path).map_err(CoreError::FileRead)?;
        let stored: StoredDonor =
            serde_yaml::from_str(&contents).map_err(CoreError::YamlDeserialization)?;
        Ok(stored.into_donor(id.to_string()))
    }
}

impl DonorDirectory for DonorService {
    type Profile = DonorProfile;

    fn list_all(&self) -> CoreResult<Vec<Donor>> {
        self.list_donors()
    }
}
