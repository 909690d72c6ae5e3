//! Input validation for donor search queries.
//!
//! The matcher accepts any numbers. The request router calls [`validate_search`] first so that
//! out-of-range coordinates and a NaN radius are reported to the client instead of silently
//! producing an empty result.

use crate::geo::Coordinate;
use crate::{CoreError, CoreResult};

/// Validates a search origin and radius.
///
/// The radius may be zero, negative (both yield no matches) or infinite (no limit), but not
/// NaN.
///
/// # Errors
///
/// Returns `CoreError::InvalidInput` if the coordinate is out of range or non-finite, or the
/// radius is NaN.
pub fn validate_search(origin: Coordinate, max_distance_km: f64) -> CoreResult<()> {
    origin.validate()?;

    if max_distance_km.is_nan() {
        return Err(CoreError::InvalidInput(
            "max_distance must be a number".into(),
        ));
    }

    Ok(())
}
