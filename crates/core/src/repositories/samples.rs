//! Sample donors around Dehradun, for demos and local development.
//!
//! Searching from (30.3275, 78.0325) with the default radius returns all of them.

use crate::error::CoreResult;
use crate::repositories::donors::{DonorRegistration, DonorService};
use chrono::{DateTime, Duration, Utc};

/// Centre of the sample data set.
pub const SAMPLE_ORIGIN: (f64, f64) = (30.3275, 78.0325);

struct Sample {
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    blood_type: &'static str,
    age: u32,
    weight_kg: f64,
    address: &'static str,
    latitude: f64,
    longitude: f64,
    days_since_donation: i64,
}

const SAMPLES: [Sample; 10] = [
    Sample {
        name: "Rajesh Kumar",
        email: "rajesh.kumar@example.com",
        phone: "+91-9876543210",
        blood_type: "O+",
        age: 28,
        weight_kg: 75.5,
        address: "Clock Tower, Dehradun, Uttarakhand 248001",
        latitude: 30.3165,
        longitude: 78.0322,
        days_since_donation: 90,
    },
    Sample {
        name: "Priya Sharma",
        email: "priya.sharma@example.com",
        phone: "+91-9876543211",
        blood_type: "A+",
        age: 32,
        weight_kg: 62.0,
        address: "Rajpur Road, Dehradun, Uttarakhand 248009",
        latitude: 30.3398,
        longitude: 78.0445,
        days_since_donation: 120,
    },
    Sample {
        name: "Amit Singh",
        email: "amit.singh@example.com",
        phone: "+91-9876543212",
        blood_type: "B+",
        age: 45,
        weight_kg: 85.0,
        address: "Paltan Bazaar, Dehradun, Uttarakhand 248001",
        latitude: 30.3255,
        longitude: 78.0436,
        days_since_donation: 60,
    },
    Sample {
        name: "Neha Gupta",
        email: "neha.gupta@example.com",
        phone: "+91-9876543213",
        blood_type: "AB+",
        age: 29,
        weight_kg: 58.5,
        address: "Sahastradhara Road, Dehradun, Uttarakhand 248001",
        latitude: 30.3618,
        longitude: 78.0832,
        days_since_donation: 150,
    },
    Sample {
        name: "Vikram Yadav",
        email: "vikram.yadav@example.com",
        phone: "+91-9876543214",
        blood_type: "O-",
        age: 38,
        weight_kg: 80.0,
        address: "Mussoorie Road, Dehradun, Uttarakhand 248009",
        latitude: 30.3255,
        longitude: 78.0322,
        days_since_donation: 100,
    },
    Sample {
        name: "Anjali Verma",
        email: "anjali.verma@example.com",
        phone: "+91-9876543215",
        blood_type: "A-",
        age: 26,
        weight_kg: 55.0,
        address: "GMS Road, Dehradun, Uttarakhand 248001",
        latitude: 30.3186,
        longitude: 78.0378,
        days_since_donation: 80,
    },
    Sample {
        name: "Sanjay Rawat",
        email: "sanjay.rawat@example.com",
        phone: "+91-9876543216",
        blood_type: "B-",
        age: 41,
        weight_kg: 90.5,
        address: "EC Road, Dehradun, Uttarakhand 248001",
        latitude: 30.3203,
        longitude: 78.0294,
        days_since_donation: 110,
    },
    Sample {
        name: "Kavita Negi",
        email: "kavita.negi@example.com",
        phone: "+91-9876543217",
        blood_type: "O+",
        age: 34,
        weight_kg: 65.0,
        address: "Haridwar Road, Dehradun, Uttarakhand 248001",
        latitude: 30.2993,
        longitude: 78.0190,
        days_since_donation: 70,
    },
    Sample {
        name: "Rohit Bisht",
        email: "rohit.bisht@example.com",
        phone: "+91-9876543218",
        blood_type: "A+",
        age: 50,
        weight_kg: 78.0,
        address: "Ballupur, Dehradun, Uttarakhand 248001",
        latitude: 30.3431,
        longitude: 78.0569,
        days_since_donation: 130,
    },
    Sample {
        name: "Sunita Chauhan",
        email: "sunita.chauhan@example.com",
        phone: "+91-9876543219",
        blood_type: "AB-",
        age: 27,
        weight_kg: 60.0,
        address: "Prem Nagar, Dehradun, Uttarakhand 248007",
        latitude: 30.2863,
        longitude: 78.0649,
        days_since_donation: 95,
    },
];

/// Registrations for the sample donors, dated relative to `now`.
pub fn sample_registrations(now: DateTime<Utc>) -> Vec<DonorRegistration> {
    SAMPLES
        .iter()
        .map(|s| DonorRegistration {
            name: s.name.into(),
            email: s.email.into(),
            phone: s.phone.into(),
            blood_type: s.blood_type.into(),
            age: s.age,
            weight_kg: s.weight_kg,
            address: s.address.into(),
            latitude: s.latitude,
            longitude: s.longitude,
            last_donation_date: Some(
                (now - Duration::days(s.days_since_donation))
                    .format("%Y-%m-%d")
                    .to_string(),
            ),
            medical_conditions: None,
        })
        .collect()
}

/// Registers the sample donors unless the directory already holds donors.
///
/// Registration times are spaced a day apart, oldest first, so listings follow the sample
/// order. Returns the number of donors created.
pub fn seed_sample_donors(service: &DonorService, now: DateTime<Utc>) -> CoreResult<usize> {
    let existing = service.list_donors()?.len();
    if existing > 0 {
        tracing::info!("directory already has {} donors, skipping sample data", existing);
        return Ok(0);
    }

    let registrations = sample_registrations(now);
    let total = registrations.len() as i64;
    for (i, registration) in registrations.into_iter().enumerate() {
        let registered_at = now - Duration::days(total - i as i64);
        service.register_at(registration, registered_at)?;
    }

    tracing::info!("created {} sample donors", total);
    Ok(total as usize)
}
