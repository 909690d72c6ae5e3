//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services as an
//! `Arc<CoreConfig>`. Services never read process-wide environment variables while handling a
//! request.
//!
//! Resolution takes a lookup function rather than reading `std::env` directly, so binaries pass
//! `|key| std::env::var(key).ok()` and tests pass a map.

use crate::constants::{
    DEFAULT_DATA_DIR, DEFAULT_MAX_DISTANCE_KM, DONORS_DIR_NAME, NGO_CONTACTS_DIR_NAME,
    REQUESTS_DIR_NAME,
};
use crate::repositories::ngo::NgoInfo;
use crate::{CoreError, CoreResult};
use std::path::{Path, PathBuf};

/// Environment key for the storage root.
pub const ENV_DATA_DIR: &str = "BLOODLINK_DATA_DIR";
/// Environment key for the default search radius.
pub const ENV_MAX_DISTANCE_KM: &str = "BLOODLINK_MAX_DISTANCE_KM";
pub const ENV_NGO_NAME: &str = "NGO_NAME";
pub const ENV_NGO_EMAIL: &str = "NGO_EMAIL";
pub const ENV_NGO_PHONE: &str = "NGO_PHONE";
pub const ENV_NGO_EMERGENCY_EMAIL: &str = "NGO_EMERGENCY_EMAIL";
pub const ENV_NGO_DESCRIPTION: &str = "NGO_DESCRIPTION";

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    default_max_distance_km: f64,
    ngo: NgoInfo,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidInput` if the default radius is not a finite, non-negative
    /// number.
    pub fn new(data_dir: PathBuf, default_max_distance_km: f64, ngo: NgoInfo) -> CoreResult<Self> {
        if !default_max_distance_km.is_finite() || default_max_distance_km < 0.0 {
            return Err(CoreError::InvalidInput(format!(
                "default max distance must be a finite, non-negative number of km, got {}",
                default_max_distance_km
            )));
        }

        Ok(Self {
            data_dir,
            default_max_distance_km,
            ngo,
        })
    }

    /// Resolve configuration from a key lookup, applying defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> CoreResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_dir = non_empty(lookup(ENV_DATA_DIR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
        let max_distance = max_distance_from_env_value(lookup(ENV_MAX_DISTANCE_KM))?;

        let defaults = NgoInfo::default();
        let ngo = NgoInfo {
            name: non_empty(lookup(ENV_NGO_NAME)).unwrap_or(defaults.name),
            email: non_empty(lookup(ENV_NGO_EMAIL)).unwrap_or(defaults.email),
            phone: non_empty(lookup(ENV_NGO_PHONE)).unwrap_or(defaults.phone),
            emergency_email: non_empty(lookup(ENV_NGO_EMERGENCY_EMAIL))
                .unwrap_or(defaults.emergency_email),
            description: non_empty(lookup(ENV_NGO_DESCRIPTION)).unwrap_or(defaults.description),
        };

        Self::new(data_dir, max_distance, ngo)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn donors_dir(&self) -> PathBuf {
        self.data_dir.join(DONORS_DIR_NAME)
    }

    pub fn requests_dir(&self) -> PathBuf {
        self.data_dir.join(REQUESTS_DIR_NAME)
    }

    pub fn ngo_contacts_dir(&self) -> PathBuf {
        self.data_dir.join(NGO_CONTACTS_DIR_NAME)
    }

    pub fn default_max_distance_km(&self) -> f64 {
        self.default_max_distance_km
    }

    pub fn ngo(&self) -> &NgoInfo {
        &self.ngo
    }
}

/// Parse the default search radius from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_DISTANCE_KM`].
pub fn max_distance_from_env_value(value: Option<String>) -> CoreResult<f64> {
    match non_empty(value) {
        None => Ok(DEFAULT_MAX_DISTANCE_KM),
        Some(v) => v.parse::<f64>().map_err(|e| {
            CoreError::InvalidInput(format!("{ENV_MAX_DISTANCE_KM} '{v}' is not a number: {e}"))
        }),
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_applies_defaults() {
        let cfg = CoreConfig::from_lookup(|_| None).expect("defaults should resolve");

        assert_eq!(cfg.data_dir(), Path::new(DEFAULT_DATA_DIR));
        assert_eq!(cfg.default_max_distance_km(), DEFAULT_MAX_DISTANCE_KM);
        assert_eq!(cfg.ngo(), &NgoInfo::default());
        assert_eq!(cfg.donors_dir(), Path::new(DEFAULT_DATA_DIR).join(DONORS_DIR_NAME));
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let cfg = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DATA_DIR, "/srv/bloodlink"),
            (ENV_MAX_DISTANCE_KM, " 25.5 "),
            (ENV_NGO_NAME, "Doon Blood Helpline"),
            (ENV_NGO_PHONE, "   "),
        ]))
        .expect("overrides should resolve");

        assert_eq!(cfg.data_dir(), Path::new("/srv/bloodlink"));
        assert_eq!(cfg.default_max_distance_km(), 25.5);
        assert_eq!(cfg.ngo().name, "Doon Blood Helpline");
        assert_eq!(cfg.ngo().phone, NgoInfo::default().phone);
    }

    #[test]
    fn test_invalid_radius_is_rejected() {
        let err = max_distance_from_env_value(Some("far".into())).expect_err("not a number");
        assert!(matches!(err, CoreError::InvalidInput(msg) if msg.contains("not a number")));

        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_MAX_DISTANCE_KM, "-3")]))
            .expect_err("negative radius");
        assert!(matches!(err, CoreError::InvalidInput(_)));

        assert!(CoreConfig::new(PathBuf::from("x"), f64::NAN, NgoInfo::default()).is_err());
    }
}
