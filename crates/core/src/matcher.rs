//! Proximity matching.
//!
//! [`find_matches`] answers "which eligible donors are closest to this point": it optionally
//! narrows a donor snapshot by blood-type compatibility, measures the haversine distance to each
//! candidate, keeps those within the radius and returns them nearest first.
//!
//! The function is pure. It reads the slice it is given, allocates its own output and touches
//! no shared state, so concurrent calls over independent (or shared, immutable) snapshots need
//! no coordination. Cost is a linear scan plus an `O(n log n)` sort; callers own any cap on
//! directory size.
//!
//! ## Numeric edge cases
//!
//! Filtering uses an inclusive `distance <= max_distance_km` test on the full-precision
//! distance, so:
//! - a radius of zero keeps only donors exactly at the origin, and a negative radius keeps none;
//! - a NaN radius, or a NaN distance produced by NaN coordinates, fails the test and is dropped;
//! - an infinite radius keeps every finite distance.
//!
//! Coordinates are not range-checked here. See [`Coordinate::validate`] for the input layer.

use crate::compatibility::{compatible_types, BloodType};
use crate::geo::{haversine_km, round_km, Coordinate};
use serde::{Deserialize, Serialize};

/// A donor as consumed by the matcher.
///
/// `profile` is opaque to matching and is carried through to the result unchanged.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DonorRecord<P> {
    pub id: String,
    pub blood_type: BloodType,
    pub coordinate: Coordinate,
    pub profile: P,
}

/// A donor annotated with its distance from the query origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchResult<P> {
    pub donor: DonorRecord<P>,
    /// Kilometres, rounded to two decimal places.
    pub distance_km: f64,
}

/// Finds donors within `max_distance_km` of `origin`, nearest first.
///
/// When `requested_type` is `Some`, only donors whose blood type is in
/// [`compatible_types`] for it are considered; `None` considers every donor.
///
/// Ordering is by full-precision distance. Equal distances keep their relative input order.
/// Only the reported `distance_km` is rounded.
pub fn find_matches<P: Clone>(
    requested_type: Option<&BloodType>,
    origin: Coordinate,
    max_distance_km: f64,
    donors: &[DonorRecord<P>],
) -> Vec<MatchResult<P>> {
    let eligible = requested_type.map(compatible_types);

    let mut within: Vec<(f64, &DonorRecord<P>)> = donors
        .iter()
        .filter(|donor| match &eligible {
            Some(types) => types.contains(&donor.blood_type),
            None => true,
        })
        .map(|donor| (haversine_km(origin, donor.coordinate), donor))
        .filter(|(distance, _)| *distance <= max_distance_km)
        .collect();

    // `sort_by` is stable, which preserves input order for ties. NaN cannot reach this point.
    within.sort_by(|(a, _), (b, _)| a.total_cmp(b));

    within
        .into_iter()
        .map(|(distance, donor)| MatchResult {
            donor: donor.clone(),
            distance_km: round_km(distance),
        })
        .collect()
}
