//! JSON request and response bodies.
//!
//! Field names follow the public blood-bank API: donors carry `weight` (kg) and matches carry
//! `distance` (km, two decimals).

use bloodlink_core::{
    BloodRequest, CoreError, CoreResult, Donor, DonorProfile, DonorRegistration, MatchResult,
    NewBloodRequest, NewNgoContact, NgoContact, NgoInfo, RequestStatus, Urgency,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RootRes {
    pub message: String,
}

/// Error body returned for every non-2xx response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Machine-readable code, e.g. `duplicate_email`.
    pub error: String,
    pub message: String,
}

// ============================================================================
// Donors
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterDonorReq {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[schema(example = "O+")]
    pub blood_type: String,
    pub age: u32,
    /// Kilograms.
    pub weight: f64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// `YYYY-MM-DD`.
    #[serde(default)]
    pub last_donation_date: Option<String>,
    #[serde(default)]
    pub medical_conditions: Option<String>,
}

impl From<RegisterDonorReq> for DonorRegistration {
    fn from(req: RegisterDonorReq) -> Self {
        DonorRegistration {
            name: req.name,
            email: req.email,
            phone: req.phone,
            blood_type: req.blood_type,
            age: req.age,
            weight_kg: req.weight,
            address: req.address,
            latitude: req.latitude,
            longitude: req.longitude,
            last_donation_date: req.last_donation_date,
            medical_conditions: req.medical_conditions,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RegisterDonorRes {
    pub success: bool,
    pub message: String,
    pub donor_id: String,
}

/// Full donor record as listed by `GET /api/donors`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DonorRes {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub blood_type: String,
    pub age: u32,
    pub weight: f64,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub last_donation_date: Option<String>,
    pub medical_conditions: Option<String>,
    /// RFC 3339.
    pub registered_at: String,
}

impl From<Donor> for DonorRes {
    fn from(donor: Donor) -> Self {
        let DonorProfile {
            name,
            email,
            phone,
            age,
            weight_kg,
            address,
            last_donation_date,
            medical_conditions,
            registered_at,
        } = donor.profile;

        DonorRes {
            id: donor.id,
            name,
            email,
            phone,
            blood_type: donor.blood_type.to_string(),
            age,
            weight: weight_kg,
            address,
            latitude: donor.coordinate.latitude,
            longitude: donor.coordinate.longitude,
            last_donation_date: last_donation_date.map(|d| d.format("%Y-%m-%d").to_string()),
            medical_conditions,
            registered_at: registered_at.to_rfc3339(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListDonorsRes {
    pub donors: Vec<DonorRes>,
}

/// A donor's public fields plus distance from the query origin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MatchedDonorRes {
    pub id: String,
    pub name: String,
    pub blood_type: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Kilometres from the query origin, rounded to two decimals.
    pub distance: f64,
}

impl From<MatchResult<DonorProfile>> for MatchedDonorRes {
    fn from(result: MatchResult<DonorProfile>) -> Self {
        let donor = result.donor;
        MatchedDonorRes {
            id: donor.id,
            name: donor.profile.name,
            blood_type: donor.blood_type.to_string(),
            phone: donor.profile.phone,
            email: donor.profile.email,
            address: donor.profile.address,
            latitude: donor.coordinate.latitude,
            longitude: donor.coordinate.longitude,
            distance: result.distance_km,
        }
    }
}

/// Response of the untyped nearby search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearbyDonorsRes {
    pub donors: Vec<MatchedDonorRes>,
    pub total: usize,
}

impl From<Vec<MatchResult<DonorProfile>>> for NearbyDonorsRes {
    fn from(matches: Vec<MatchResult<DonorProfile>>) -> Self {
        let donors: Vec<MatchedDonorRes> = matches.into_iter().map(Into::into).collect();
        let total = donors.len();
        NearbyDonorsRes { donors, total }
    }
}

/// Response of the typed nearest-donor search.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NearestDonorsRes {
    pub donors: Vec<MatchedDonorRes>,
}

// ============================================================================
// Blood requests
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateBloodRequestReq {
    pub patient_name: String,
    pub hospital_name: String,
    #[schema(example = "AB-")]
    pub blood_type: String,
    pub units_needed: u32,
    /// One of `normal`, `urgent`, `critical`, `emergency`. Defaults to `normal`.
    #[serde(default)]
    pub urgency: Option<String>,
    pub contact_phone: String,
    pub contact_email: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub additional_info: Option<String>,
}

impl TryFrom<CreateBloodRequestReq> for NewBloodRequest {
    type Error = CoreError;

    fn try_from(req: CreateBloodRequestReq) -> CoreResult<Self> {
        Ok(NewBloodRequest {
            patient_name: req.patient_name,
            hospital_name: req.hospital_name,
            blood_type: req.blood_type,
            units_needed: req.units_needed,
            urgency: parse_urgency(req.urgency.as_deref(), Urgency::Normal)?,
            contact_phone: req.contact_phone,
            contact_email: req.contact_email,
            latitude: req.latitude,
            longitude: req.longitude,
            additional_info: req.additional_info,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateBloodRequestRes {
    pub success: bool,
    pub message: String,
    pub request_id: String,
    pub nearest_donors: Vec<MatchedDonorRes>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BloodRequestRes {
    pub id: String,
    pub patient_name: String,
    pub hospital_name: String,
    pub blood_type: String,
    pub units_needed: u32,
    pub urgency: String,
    pub contact_phone: String,
    pub contact_email: String,
    pub latitude: f64,
    pub longitude: f64,
    pub additional_info: Option<String>,
    pub status: String,
    pub created_at: String,
}

impl From<BloodRequest> for BloodRequestRes {
    fn from(request: BloodRequest) -> Self {
        BloodRequestRes {
            id: request.id,
            patient_name: request.patient_name,
            hospital_name: request.hospital_name,
            blood_type: request.blood_type.to_string(),
            units_needed: request.units_needed,
            urgency: request.urgency.to_string(),
            contact_phone: request.contact_phone,
            contact_email: request.contact_email,
            latitude: request.coordinate.latitude,
            longitude: request.coordinate.longitude,
            additional_info: request.additional_info,
            status: request.status.to_string(),
            created_at: request.created_at.to_rfc3339(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UpdateRequestStatusReq {
    /// `fulfilled` or `cancelled`.
    pub status: String,
}

impl TryFrom<UpdateRequestStatusReq> for RequestStatus {
    type Error = CoreError;

    fn try_from(req: UpdateRequestStatusReq) -> CoreResult<Self> {
        req.status.parse()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ListBloodRequestsRes {
    pub requests: Vec<BloodRequestRes>,
}

// ============================================================================
// NGO channel
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NgoInfoRes {
    pub ngo_name: String,
    pub ngo_email: String,
    pub ngo_phone: String,
    pub ngo_emergency_email: String,
    pub description: String,
}

impl From<&NgoInfo> for NgoInfoRes {
    fn from(info: &NgoInfo) -> Self {
        NgoInfoRes {
            ngo_name: info.name.clone(),
            ngo_email: info.email.clone(),
            ngo_phone: info.phone.clone(),
            ngo_emergency_email: info.emergency_email.clone(),
            description: info.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NgoContactReq {
    pub user_name: String,
    pub user_email: String,
    pub user_phone: String,
    #[serde(default)]
    pub blood_type_needed: Option<String>,
    /// One of `normal`, `urgent`, `critical`, `emergency`. Defaults to `urgent`.
    #[serde(default)]
    pub urgency_level: Option<String>,
    pub message: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

impl TryFrom<NgoContactReq> for NewNgoContact {
    type Error = CoreError;

    fn try_from(req: NgoContactReq) -> CoreResult<Self> {
        Ok(NewNgoContact {
            user_name: req.user_name,
            user_email: req.user_email,
            user_phone: req.user_phone,
            blood_type_needed: req.blood_type_needed,
            urgency_level: parse_urgency(req.urgency_level.as_deref(), Urgency::Urgent)?,
            message: req.message,
            location: req.location,
            latitude: req.latitude,
            longitude: req.longitude,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct NgoContactRes {
    pub success: bool,
    pub message: String,
    pub contact_id: String,
}

impl From<NgoContact> for NgoContactRes {
    fn from(contact: NgoContact) -> Self {
        NgoContactRes {
            success: true,
            message: "Your request has been sent to the NGO".into(),
            contact_id: contact.id,
        }
    }
}

fn parse_urgency(value: Option<&str>, default: Urgency) -> CoreResult<Urgency> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(default),
        Some(v) => v.parse(),
    }
}
