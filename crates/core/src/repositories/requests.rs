//! Blood requests.
//!
//! Creating a request stores it under `blood_requests/<s1>/<s2>/<uuid>/request.yaml` with status
//! `pending`, then immediately runs the compatible-donor search around the request location so
//! the caller can contact the nearest donors. A pending request is later closed as `fulfilled`
//! or `cancelled`; closed requests are final.

use crate::compatibility::BloodType;
use crate::config::CoreConfig;
use crate::constants::REQUEST_YAML_FILENAME;
use crate::directory::DonorDirectory;
use crate::error::{CoreError, CoreResult};
use crate::geo::Coordinate;
use crate::matcher::MatchResult;
use crate::matching::nearest_compatible_donors;
use crate::repositories::shared::{
    create_uuid_and_shard_dir, read_sharded_records, write_yaml_record,
};
use crate::{EmailAddress, NonEmptyText};
use bloodlink_uuid::ShardableUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

/// How quickly blood is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    #[default]
    Normal,
    Urgent,
    Critical,
    Emergency,
}

impl Urgency {
    pub fn as_str(self) -> &'static str {
        match self {
            Urgency::Normal => "normal",
            Urgency::Urgent => "urgent",
            Urgency::Critical => "critical",
            Urgency::Emergency => "emergency",
        }
    }

    /// Critical and emergency requests are escalated to the NGO channel's emergency contact.
    pub fn is_escalated(self) -> bool {
        matches!(self, Urgency::Critical | Urgency::Emergency)
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(Urgency::Normal),
            "urgent" => Ok(Urgency::Urgent),
            "critical" => Ok(Urgency::Critical),
            "emergency" => Ok(Urgency::Emergency),
            other => Err(CoreError::InvalidInput(format!(
                "urgency must be one of normal, urgent, critical, emergency, got '{other}'"
            ))),
        }
    }
}

/// Lifecycle of a blood request. New requests start as `Pending`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    #[default]
    Pending,
    Fulfilled,
    Cancelled,
}

impl RequestStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Fulfilled => "fulfilled",
            RequestStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RequestStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(RequestStatus::Pending),
            "fulfilled" => Ok(RequestStatus::Fulfilled),
            "cancelled" => Ok(RequestStatus::Cancelled),
            other => Err(CoreError::InvalidInput(format!(
                "status must be one of pending, fulfilled, cancelled, got '{other}'"
            ))),
        }
    }
}

/// Unvalidated request input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewBloodRequest {
    pub patient_name: String,
    pub hospital_name: String,
    pub blood_type: String,
    pub units_needed: u32,
    pub urgency: Urgency,
    pub contact_phone: String,
    pub contact_email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub additional_info: Option<String>,
}

/// A stored blood request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloodRequest {
    #[serde(skip)]
    pub id: String,
    pub patient_name: String,
    pub hospital_name: String,
    pub blood_type: BloodType,
    pub units_needed: u32,
    pub urgency: Urgency,
    pub contact_phone: String,
    pub contact_email: String,
    pub coordinate: Coordinate,
    #[serde(default)]
    pub additional_info: Option<String>,
    #[serde(default)]
    pub status: RequestStatus,
    pub created_at: DateTime<Utc>,
}

/// Creation, listing and closing of blood requests.
#[derive(Clone, Debug)]
pub struct BloodRequestService {
    cfg: Arc<CoreConfig>,
    write_lock: Arc<Mutex<()>>,
}

impl BloodRequestService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self {
            cfg,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stores a new request and finds compatible donors within the configured default radius.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if:
    /// - `patient_name`, `hospital_name` or `contact_phone` is blank,
    /// - `contact_email` is malformed,
    /// - `blood_type` is not one of the eight canonical codes,
    /// - `units_needed` is zero,
    /// - the coordinate is out of range,
    /// - the request cannot be written or the directory cannot be read.
    pub fn create<D: DonorDirectory + ?Sized>(
        &self,
        request: NewBloodRequest,
        directory: &D,
    ) -> CoreResult<(BloodRequest, Vec<MatchResult<D::Profile>>)> {
        let patient_name = NonEmptyText::new(&request.patient_name)?;
        let hospital_name = NonEmptyText::new(&request.hospital_name)?;
        let contact_phone = NonEmptyText::new(&request.contact_phone)?;
        let contact_email = EmailAddress::parse(&request.contact_email)?;

        let blood_type = BloodType::parse(request.blood_type.trim());
        if !blood_type.is_canonical() {
            return Err(CoreError::InvalidInput(format!(
                "blood_type must be one of A+, A-, B+, B-, AB+, AB-, O+, O-, got '{}'",
                request.blood_type
            )));
        }
        if request.units_needed == 0 {
            return Err(CoreError::InvalidInput(
                "units_needed must be at least 1".into(),
            ));
        }

        let coordinate = Coordinate::new(request.latitude, request.longitude);
        coordinate.validate()?;

        let mut stored = BloodRequest {
            id: String::new(),
            patient_name: patient_name.into_inner(),
            hospital_name: hospital_name.into_inner(),
            blood_type,
            units_needed: request.units_needed,
            urgency: request.urgency,
            contact_phone: contact_phone.into_inner(),
            contact_email: contact_email.to_string(),
            coordinate,
            additional_info: request
                .additional_info
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            status: RequestStatus::Pending,
            created_at: Utc::now(),
        };

        let requests_dir = self.cfg.requests_dir();
        fs::create_dir_all(&requests_dir).map_err(CoreError::StorageDirCreation)?;
        let (id, record_dir) = create_uuid_and_shard_dir(&requests_dir, ShardableUuid::new)?;
        write_yaml_record(&record_dir, REQUEST_YAML_FILENAME, &stored)?;
        stored.id = id.to_string();

        tracing::info!(
            request_id = %stored.id,
            blood_type = %stored.blood_type,
            urgency = %stored.urgency,
            "blood request created"
        );
        if stored.urgency.is_escalated() {
            tracing::warn!(
                request_id = %stored.id,
                "{} blood request at {}: notify NGO emergency contact {}",
                stored.urgency,
                stored.hospital_name,
                self.cfg.ngo().emergency_email
            );
        }

        let donors = nearest_compatible_donors(
            directory,
            &stored.blood_type,
            stored.coordinate,
            self.cfg.default_max_distance_km(),
        )?;

        Ok((stored, donors))
    }

    /// Closes a pending request as `Fulfilled` or `Cancelled` and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if:
    /// - `request_id` is not canonical ([`CoreError::Uuid`]),
    /// - no such request exists ([`CoreError::RequestNotFound`]),
    /// - the request is already closed or `status` is `Pending` ([`CoreError::InvalidInput`]),
    /// - the record cannot be read or rewritten.
    pub fn update_status(
        &self,
        request_id: &str,
        status: RequestStatus,
    ) -> CoreResult<BloodRequest> {
        let id: ShardableUuid = request_id.parse()?;
        let path = id
            .sharded_dir(&self.cfg.requests_dir())
            .join(REQUEST_YAML_FILENAME);

        let _guard = self.write_lock.lock().map_err(|_| CoreError::LockPoisoned)?;

        if !path.is_file() {
            return Err(CoreError::RequestNotFound(request_id.to_string()));
        }

        let contents = fs::read_to_string(&path).map_err(CoreError::FileRead)?;
        let mut request: BloodRequest =
            serde_yaml::from_str(&contents).map_err(CoreError::YamlDeserialization)?;

        if request.status != RequestStatus::Pending {
            return Err(CoreError::InvalidInput(format!(
                "request {request_id} is already {}",
                request.status
            )));
        }
        if status == RequestStatus::Pending {
            return Err(CoreError::InvalidInput(
                "status must be fulfilled or cancelled".into(),
            ));
        }

        request.status = status;
        let yaml = serde_yaml::to_string(&request).map_err(CoreError::YamlSerialization)?;
        fs::write(&path, yaml).map_err(CoreError::FileWrite)?;
        request.id = id.to_string();

        tracing::info!(request_id = %request.id, status = %request.status, "blood request closed");
        Ok(request)
    }

    /// All requests, oldest first.
    pub fn list(&self) -> CoreResult<Vec<BloodRequest>> {
        let mut requests: Vec<BloodRequest> =
            read_sharded_records::<BloodRequest>(&self.cfg.requests_dir(), REQUEST_YAML_FILENAME)
                .into_iter()
                .map(|(id, mut request)| {
                    request.id = id;
                    request
                })
                .collect();

        requests.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(requests)
    }
}
