use clap::{Parser, Subcommand};
use std::sync::Arc;

use bloodlink_core::{
    compatible_types,
    repositories::samples::{sample_registrations, seed_sample_donors, SAMPLE_ORIGIN},
    validation::validate_search,
    BloodRequestService, BloodType, Coordinate, CoreConfig, DonorRecord, DonorRegistration,
    DonorService, InMemoryDirectory, MatchResult, NgoService, RequestStatus,
};

#[derive(Parser)]
#[command(name = "bloodlink")]
#[command(about = "Bloodlink blood donor matching CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Say hi
    Hi,
    /// Create the Dehradun sample donors (skipped if donors already exist)
    Seed,
    /// List all donors
    List,
    /// Register a donor
    Register {
        /// Full name
        name: String,
        /// Email address (must be unique)
        email: String,
        /// Phone number
        phone: String,
        /// Blood type, e.g. O+
        blood_type: String,
        /// Age in years (18-65)
        age: u32,
        /// Weight in kilograms (at least 50)
        weight: f64,
        /// Postal address
        address: String,
        /// Latitude in degrees
        #[arg(allow_hyphen_values = true)]
        latitude: f64,
        /// Longitude in degrees
        #[arg(allow_hyphen_values = true)]
        longitude: f64,
        /// Date of last donation (YYYY-MM-DD)
        #[arg(long)]
        last_donation_date: Option<String>,
        /// Known medical conditions
        #[arg(long)]
        medical_conditions: Option<String>,
    },
    /// Find donors of any blood type near a location, nearest first
    Nearby {
        /// Latitude in degrees (defaults to the sample data centre)
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        /// Longitude in degrees (defaults to the sample data centre)
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
        /// Search radius in kilometres (defaults to the configured radius)
        #[arg(long)]
        max_distance: Option<f64>,
        /// Search the built-in sample donors instead of the stored directory
        #[arg(long)]
        samples: bool,
    },
    /// Find the nearest donors able to give to a blood type
    Nearest {
        /// Requested blood type, e.g. AB-
        blood_type: String,
        /// Latitude in degrees (defaults to the sample data centre)
        #[arg(long, allow_hyphen_values = true)]
        latitude: Option<f64>,
        /// Longitude in degrees (defaults to the sample data centre)
        #[arg(long, allow_hyphen_values = true)]
        longitude: Option<f64>,
        /// Search radius in kilometres (defaults to the configured radius)
        #[arg(long)]
        max_distance: Option<f64>,
        /// Search the built-in sample donors instead of the stored directory
        #[arg(long)]
        samples: bool,
    },
    /// Show which donor blood types may give to a blood type
    Compatible {
        /// Requested blood type
        blood_type: String,
    },
    /// List blood requests
    Requests,
    /// Close a pending blood request
    CloseRequest {
        /// Request identifier
        id: String,
        /// New status: fulfilled or cancelled
        status: String,
    },
    /// Show the partner NGO's contact details
    NgoInfo,
    /// List NGO contact requests
    NgoContacts,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("bloodlink_core=warn".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let cfg = Arc::new(CoreConfig::from_lookup(|key| std::env::var(key).ok())?);

    match cli.command {
        Some(Commands::Hi) => {
            println!("hi");
        }
        Some(Commands::Seed) => {
            let service = DonorService::new(cfg);
            match seed_sample_donors(&service, chrono::Utc::now()) {
                Ok(0) => println!("Donors already exist. Skipping sample data creation."),
                Ok(created) => {
                    println!("Created {} sample donors.", created);
                    println!(
                        "Search around latitude {}, longitude {} to see them all.",
                        SAMPLE_ORIGIN.0, SAMPLE_ORIGIN.1
                    );
                }
                Err(e) => eprintln!("Error creating sample donors: {}", e),
            }
        }
        Some(Commands::List) => {
            let service = DonorService::new(cfg);
            let donors = service.list_donors()?;
            if donors.is_empty() {
                println!("No donors found.");
            } else {
                for donor in donors {
                    println!(
                        "ID: {}, Name: {}, Blood type: {}, Phone: {}, Location: ({}, {})",
                        donor.id,
                        donor.profile.name,
                        donor.blood_type,
                        donor.profile.phone,
                        donor.coordinate.latitude,
                        donor.coordinate.longitude
                    );
                }
            }
        }
        Some(Commands::Register {
            name,
            email,
            phone,
            blood_type,
            age,
            weight,
            address,
            latitude,
            longitude,
            last_donation_date,
            medical_conditions,
        }) => {
            let service = DonorService::new(cfg);
            let registration = DonorRegistration {
                name,
                email,
                phone,
                blood_type,
                age,
                weight_kg: weight,
                address,
                latitude,
                longitude,
                last_donation_date,
                medical_conditions,
            };
            match service.register(registration) {
                Ok(donor) => println!("Registered donor with ID: {}", donor.id),
                Err(e) => eprintln!("Error registering donor: {}", e),
            }
        }
        Some(Commands::Nearby {
            latitude,
            longitude,
            max_distance,
            samples,
        }) => {
            let origin = origin(latitude, longitude);
            let radius = max_distance.unwrap_or(cfg.default_max_distance_km());
            validate_search(origin, radius)?;

            if samples {
                let directory = sample_directory();
                let matches = bloodlink_core::nearby_donors(&directory, origin, radius)?;
                print_matches(&matches, |name| name.as_str());
            } else {
                let service = DonorService::new(cfg);
                let matches = bloodlink_core::nearby_donors(&service, origin, radius)?;
                print_matches(&matches, |profile| profile.name.as_str());
            }
        }
        Some(Commands::Nearest {
            blood_type,
            latitude,
            longitude,
            max_distance,
            samples,
        }) => {
            let origin = origin(latitude, longitude);
            let radius = max_distance.unwrap_or(cfg.default_max_distance_km());
            validate_search(origin, radius)?;
            let requested = BloodType::parse(&blood_type);

            if samples {
                let directory = sample_directory();
                let matches = bloodlink_core::nearest_compatible_donors(
                    &directory, &requested, origin, radius,
                )?;
                print_matches(&matches, |name| name.as_str());
            } else {
                let service = DonorService::new(cfg);
                let matches = bloodlink_core::nearest_compatible_donors(
                    &service, &requested, origin, radius,
                )?;
                print_matches(&matches, |profile| profile.name.as_str());
            }
        }
        Some(Commands::Compatible { blood_type }) => {
            let requested = BloodType::parse(&blood_type);
            let donors: Vec<String> = compatible_types(&requested)
                .iter()
                .map(ToString::to_string)
                .collect();
            println!("{} can receive from: {}", requested, donors.join(", "));
        }
        Some(Commands::Requests) => {
            let service = BloodRequestService::new(cfg);
            let requests = service.list()?;
            if requests.is_empty() {
                println!("No blood requests found.");
            } else {
                for request in requests {
                    println!(
                        "ID: {}, Patient: {}, Hospital: {}, Blood type: {}, Units: {}, Urgency: {}, Status: {}, Created: {}",
                        request.id,
                        request.patient_name,
                        request.hospital_name,
                        request.blood_type,
                        request.units_needed,
                        request.urgency,
                        request.status,
                        request.created_at
                    );
                }
            }
        }
        Some(Commands::CloseRequest { id, status }) => {
            let service = BloodRequestService::new(cfg);
            let status: RequestStatus = status.parse()?;
            match service.update_status(&id, status) {
                Ok(request) => println!("Request {} is now {}", request.id, request.status),
                Err(e) => eprintln!("Error updating request: {}", e),
            }
        }
        Some(Commands::NgoInfo) => {
            let service = NgoService::new(cfg);
            let info = service.info();
            println!("{}", info.name);
            println!("  Email: {}", info.email);
            println!("  Phone: {}", info.phone);
            println!("  Emergency: {}", info.emergency_email);
            println!("  {}", info.description);
        }
        Some(Commands::NgoContacts) => {
            let service = NgoService::new(cfg);
            let contacts = service.list()?;
            if contacts.is_empty() {
                println!("No NGO contact requests found.");
            } else {
                for contact in contacts {
                    println!(
                        "ID: {}, From: {} <{}>, Phone: {}, Urgency: {}, Submitted: {}",
                        contact.id,
                        contact.user_name,
                        contact.user_email,
                        contact.user_phone,
                        contact.urgency_level,
                        contact.submitted_at
                    );
                    println!("  {}", contact.message);
                }
            }
        }
        None => {
            println!("Use 'bloodlink --help' for commands");
        }
    }

    Ok(())
}

fn origin(latitude: Option<f64>, longitude: Option<f64>) -> Coordinate {
    Coordinate::new(
        latitude.unwrap_or(SAMPLE_ORIGIN.0),
        longitude.unwrap_or(SAMPLE_ORIGIN.1),
    )
}

/// In-memory snapshot of the sample donors, keyed `sample-1` to `sample-10`.
fn sample_directory() -> InMemoryDirectory<String> {
    let donors = sample_registrations(chrono::Utc::now())
        .into_iter()
        .enumerate()
        .map(|(i, registration)| DonorRecord {
            id: format!("sample-{}", i + 1),
            blood_type: BloodType::parse(&registration.blood_type),
            coordinate: Coordinate::new(registration.latitude, registration.longitude),
            profile: registration.name,
        })
        .collect();
    InMemoryDirectory::new(donors)
}

fn print_matches<P>(matches: &[MatchResult<P>], name: impl Fn(&P) -> &str) {
    if matches.is_empty() {
        println!("No donors found.");
        return;
    }
    for result in matches {
        println!(
            "{:>7.2} km  {:<4} {} (ID: {})",
            result.distance_km,
            result.donor.blood_type.as_str(),
            name(&result.donor.profile),
            result.donor.id
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_directory_holds_all_samples() {
        let directory = sample_directory();
        assert_eq!(directory.len(), 10);

        let origin = origin(None, None);
        let matches = bloodlink_core::nearest_compatible_donors(
            &directory,
            &BloodType::parse("O-"),
            origin,
            50.0,
        )
        .unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].donor.profile, "Vikram Yadav");
        assert_eq!(matches[0].donor.id, "sample-5");
    }

    #[test]
    fn test_cli_parses_negative_coordinates() {
        let cli = Cli::try_parse_from([
            "bloodlink",
            "nearest",
            "A+",
            "--latitude",
            "-33.86",
            "--longitude",
            "151.2",
            "--samples",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::Nearest {
                blood_type,
                latitude,
                samples,
                ..
            }) => {
                assert_eq!(blood_type, "A+");
                assert_eq!(latitude, Some(-33.86));
                assert!(samples);
            }
            _ => panic!("expected nearest command"),
        }
    }

    #[test]
    fn test_cli_parses_close_request() {
        let cli = Cli::try_parse_from([
            "bloodlink",
            "close-request",
            "550e8400e29b41d4a716446655440000",
            "fulfilled",
        ])
        .unwrap();

        match cli.command {
            Some(Commands::CloseRequest { id, status }) => {
                assert_eq!(id, "550e8400e29b41d4a716446655440000");
                assert_eq!(status.parse::<RequestStatus>().unwrap(), RequestStatus::Fulfilled);
            }
            _ => panic!("expected close-request command"),
        }
    }
}
