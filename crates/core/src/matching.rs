//! The two public donor queries, wired from a [`DonorDirectory`] into [`find_matches`].

use crate::compatibility::{compatible_types, BloodType};
use crate::directory::DonorDirectory;
use crate::geo::Coordinate;
use crate::matcher::{find_matches, MatchResult};
use crate::CoreResult;

/// All donors within `max_distance_km` of `origin`, regardless of blood type, nearest first.
pub fn nearby_donors<D: DonorDirectory + ?Sized>(
    directory: &D,
    origin: Coordinate,
    max_distance_km: f64,
) -> CoreResult<Vec<MatchResult<D::Profile>>> {
    let donors = directory.list_all()?;
    let matches = find_matches(None, origin, max_distance_km, &donors);

    tracing::debug!(
        candidates = donors.len(),
        matched = matches.len(),
        max_distance_km,
        "nearby donor search"
    );
    Ok(matches)
}

/// Donors able to give to `blood_type` within `max_distance_km` of `origin`, nearest first.
///
/// The directory is asked for compatible types only, and the matcher applies the same
/// compatibility rule again, so a directory that ignores the type hint still yields correct
/// results.
pub fn nearest_compatible_donors<D: DonorDirectory + ?Sized>(
    directory: &D,
    blood_type: &BloodType,
    origin: Coordinate,
    max_distance_km: f64,
) -> CoreResult<Vec<MatchResult<D::Profile>>> {
    if !blood_type.is_canonical() {
        tracing::warn!(blood_type = %blood_type, "unrecognised blood type, matching identical codes only");
    }

    let donors = directory.list_by_types(&compatible_types(blood_type))?;
    let matches = find_matches(Some(blood_type), origin, max_distance_km, &donors);

    tracing::debug!(
        blood_type = %blood_type,
        candidates = donors.len(),
        matched = matches.len(),
        max_distance_km,
        "compatible donor search"
    );
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::directory::InMemoryDirectory;
    use crate::matcher::DonorRecord;

    fn record(id: &str, blood_type: &str, latitude: f64, longitude: f64) -> DonorRecord<String> {
        DonorRecord {
            id: id.into(),
            blood_type: BloodType::parse(blood_type),
            coordinate: Coordinate::new(latitude, longitude),
            profile: format!("profile-{id}"),
        }
    }

    fn directory() -> InMemoryDirectory<String> {
        InMemoryDirectory::new(vec![
            record("near-a", "A+", 30.3265, 78.0325),
            record("far-o", "O-", 31.5, 78.0325),
            record("mid-b", "B+", 30.3165, 78.0322),
            record("near-o", "O+", 30.3275, 78.0330),
        ])
    }

    /// A directory that ignores the type hint and always returns everything.
    struct Unfiltered(InMemoryDirectory<String>);

    impl DonorDirectory for Unfiltered {
        type Profile = String;

        fn list_all(&self) -> CoreResult<Vec<DonorRecord<String>>> {
            self.0.list_all()
        }

        fn list_by_types(&self, _types: &[BloodType]) -> CoreResult<Vec<DonorRecord<String>>> {
            self.0.list_all()
        }
    }

    #[test]
    fn test_nearby_donors_ignores_blood_type() {
        let origin = Coordinate::new(30.3275, 78.0325);
        let matches = nearby_donors(&directory(), origin, 50.0).unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.donor.id.as_str()).collect();
        assert_eq!(ids, vec!["near-o", "near-a", "mid-b"]);
        assert_eq!(matches[0].donor.profile, "profile-near-o");
    }

    #[test]
    fn test_nearest_compatible_donors_applies_table() {
        let origin = Coordinate::new(30.3275, 78.0325);
        let matches =
            nearest_compatible_donors(&directory(), &BloodType::parse("O+"), origin, 500.0)
                .unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.donor.id.as_str()).collect();
        assert_eq!(ids, vec!["near-o", "far-o"]);
    }

    #[test]
    fn test_compatibility_enforced_even_if_directory_ignores_hint() {
        let origin = Coordinate::new(30.3275, 78.0325);
        let unfiltered = Unfiltered(directory());

        let matches =
            nearest_compatible_donors(&unfiltered, &BloodType::parse("A-"), origin, 500.0)
                .unwrap();

        let ids: Vec<&str> = matches.iter().map(|m| m.donor.id.as_str()).collect();
        assert_eq!(ids, vec!["far-o"]);
    }
}
