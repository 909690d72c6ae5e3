//! NGO contact channel.
//!
//! People who cannot find a donor through the directory can ask the partner NGO for help. The
//! NGO's contact details come from configuration; submitted contact requests are stored under
//! `ngo_contacts/<s1>/<s2>/<uuid>/contact.yaml` for the NGO to work through.

use crate::compatibility::BloodType;
use crate::config::CoreConfig;
use crate::constants::NGO_CONTACT_YAML_FILENAME;
use crate::error::{CoreError, CoreResult};
use crate::geo::Coordinate;
use crate::repositories::requests::Urgency;
use crate::repositories::shared::{
    create_uuid_and_shard_dir, read_sharded_records, write_yaml_record,
};
use crate::{EmailAddress, NonEmptyText};
use bloodlink_uuid::ShardableUuid;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::sync::Arc;

/// Public contact details of the partner NGO.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgoInfo {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub emergency_email: String,
    pub description: String,
}

impl Default for NgoInfo {
    fn default() -> Self {
        Self {
            name: "Blood Donors Helpline".into(),
            email: "help@blooddonors.example.org".into(),
            phone: "+91-1800-000-0000".into(),
            emergency_email: "emergency@blooddonors.example.org".into(),
            description: "Volunteer network that arranges donors and blood units when no \
                          registered donor is available nearby."
                .into(),
        }
    }
}

/// Unvalidated contact request input.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NewNgoContact {
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    pub blood_type_needed: Option<String>,
    pub urgency_level: Urgency,
    pub message: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// A stored contact request.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NgoContact {
    #[serde(skip)]
    pub id: String,
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    #[serde(default)]
    pub blood_type_needed: Option<BloodType>,
    pub urgency_level: Urgency,
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub coordinate: Option<Coordinate>,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NgoService {
    cfg: Arc<CoreConfig>,
}

impl NgoService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn info(&self) -> &NgoInfo {
        self.cfg.ngo()
    }

    /// Validates and stores a contact request.
    ///
    /// Latitude and longitude are optional but must be supplied together. Critical and
    /// emergency requests are logged as escalations.
    pub fn submit(&self, contact: NewNgoContact) -> CoreResult<NgoContact> {
        let user_name = NonEmptyText::new(&contact.user_name)?;
        let user_email = EmailAddress::parse(&contact.user_email)?;
        let user_phone = NonEmptyText::new(&contact.user_phone)?;
        let message = NonEmptyText::new(&contact.message)?;

        let blood_type_needed = match contact
            .blood_type_needed
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            None => None,
            Some(code) => {
                let blood_type = BloodType::parse(code);
                if !blood_type.is_canonical() {
                    return Err(CoreError::InvalidInput(format!(
                        "blood_type_needed must be a canonical blood type, got '{code}'"
                    )));
                }
                Some(blood_type)
            }
        };

        let coordinate = match (contact.latitude, contact.longitude) {
            (None, None) => None,
            (Some(latitude), Some(longitude)) => {
                let coordinate = Coordinate::new(latitude, longitude);
                coordinate.validate()?;
                Some(coordinate)
            }
            _ => {
                return Err(CoreError::InvalidInput(
                    "latitude and longitude must be provided together".into(),
                ))
            }
        };

        let mut stored = NgoContact {
            id: String::new(),
            user_name: user_name.into_inner(),
            user_email: user_email.to_string(),
            user_phone: user_phone.into_inner(),
            blood_type_needed,
            urgency_level: contact.urgency_level,
            message: message.into_inner(),
            location: contact
                .location
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            coordinate,
            submitted_at: Utc::now(),
        };

        let contacts_dir = self.cfg.ngo_contacts_dir();
        fs::create_dir_all(&contacts_dir).map_err(CoreError::StorageDirCreation)?;
        let (id, record_dir) = create_uuid_and_shard_dir(&contacts_dir, ShardableUuid::new)?;
        write_yaml_record(&record_dir, NGO_CONTACT_YAML_FILENAME, &stored)?;
        stored.id = id.to_string();

        if stored.urgency_level.is_escalated() {
            tracing::warn!(
                contact_id = %stored.id,
                "{} NGO contact request from {}: forward to {}",
                stored.urgency_level,
                stored.user_phone,
                self.cfg.ngo().emergency_email
            );
        } else {
            tracing::info!(contact_id = %stored.id, "NGO contact request received");
        }

        Ok(stored)
    }

    /// All contact requests, oldest first.
    pub fn list(&self) -> CoreResult<Vec<NgoContact>> {
        let mut contacts: Vec<NgoContact> = read_sharded_records::<NgoContact>(
            &self.cfg.ngo_contacts_dir(),
            NGO_CONTACT_YAML_FILENAME,
        )
        .into_iter()
        .map(|(id, mut contact)| {
            contact.id = id;
            contact
        })
        .collect();

        contacts.sort_by(|a, b| {
            a.submitted_at
                .cmp(&b.submitted_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(contacts)
    }
}
