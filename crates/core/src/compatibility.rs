//! Blood-type compatibility resolution.
//!
//! Maps a requested (recipient) blood type to the ordered list of donor blood types that may be
//! transfused into it, following ABO/Rh rules: `O-` is the universal donor and `AB+` the
//! universal recipient.
//!
//! The table is a `match` over [`BloodGroup`], so it is fixed at compile time and shared by
//! every caller without any global state.
//!
//! ## Unrecognised codes
//!
//! Codes outside the eight canonical values are not rejected here. They resolve to a single
//! entry containing the input itself, so an unknown type only ever matches donors stored with
//! exactly the same string. Stricter validation belongs to the input and storage layers
//! (see [`BloodType::is_canonical`]).

use std::fmt;

/// One of the eight canonical ABO/Rh blood groups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BloodGroup {
    APositive,
    ANegative,
    BPositive,
    BNegative,
    AbPositive,
    AbNegative,
    OPositive,
    ONegative,
}

impl BloodGroup {
    /// All canonical groups, in the order used by forms and listings.
    pub const ALL: [BloodGroup; 8] = [
        BloodGroup::APositive,
        BloodGroup::ANegative,
        BloodGroup::BPositive,
        BloodGroup::BNegative,
        BloodGroup::AbPositive,
        BloodGroup::AbNegative,
        BloodGroup::OPositive,
        BloodGroup::ONegative,
    ];

    /// The wire/storage code, e.g. `"AB-"`.
    pub fn code(self) -> &'static str {
        match self {
            BloodGroup::APositive => "A+",
            BloodGroup::ANegative => "A-",
            BloodGroup::BPositive => "B+",
            BloodGroup::BNegative => "B-",
            BloodGroup::AbPositive => "AB+",
            BloodGroup::AbNegative => "AB-",
            BloodGroup::OPositive => "O+",
            BloodGroup::ONegative => "O-",
        }
    }

    /// Exact-match lookup of a canonical code. No trimming or case folding.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A+" => Some(BloodGroup::APositive),
            "A-" => Some(BloodGroup::ANegative),
            "B+" => Some(BloodGroup::BPositive),
            "B-" => Some(BloodGroup::BNegative),
            "AB+" => Some(BloodGroup::AbPositive),
            "AB-" => Some(BloodGroup::AbNegative),
            "O+" => Some(BloodGroup::OPositive),
            "O-" => Some(BloodGroup::ONegative),
            _ => None,
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A blood type as it appears on a donor record or a query.
///
/// Parsing never fails: anything that is not a canonical code is carried verbatim as
/// [`BloodType::Unrecognised`]. Serialises as the plain code string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum BloodType {
    Known(BloodGroup),
    Unrecognised(String),
}

impl BloodType {
    /// Classifies `code` as a canonical group or an unrecognised string.
    pub fn parse(code: &str) -> Self {
        match BloodGroup::from_code(code) {
            Some(group) => BloodType::Known(group),
            None => BloodType::Unrecognised(code.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BloodType::Known(group) => group.code(),
            BloodType::Unrecognised(code) => code,
        }
    }

    pub fn is_canonical(&self) -> bool {
        matches!(self, BloodType::Known(_))
    }
}

impl From<BloodGroup> for BloodType {
    fn from(group: BloodGroup) -> Self {
        BloodType::Known(group)
    }
}

impl From<&str> for BloodType {
    fn from(code: &str) -> Self {
        BloodType::parse(code)
    }
}

impl fmt::Display for BloodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for BloodType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for BloodType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(BloodType::parse(&s))
    }
}

/// Donor groups eligible to give to a recipient of `requested`, in table order.
pub fn eligible_donor_groups(requested: BloodGroup) -> &'static [BloodGroup] {
    use BloodGroup::*;

    match requested {
        APositive => &[APositive, ANegative, OPositive, ONegative],
        ANegative => &[ANegative, ONegative],
        BPositive => &[BPositive, BNegative, OPositive, ONegative],
        BNegative => &[BNegative, ONegative],
        AbPositive => &[
            APositive, ANegative, BPositive, BNegative, AbPositive, AbNegative, OPositive,
            ONegative,
        ],
        AbNegative => &[ANegative, BNegative, AbNegative, ONegative],
        OPositive => &[OPositive, ONegative],
        ONegative => &[ONegative],
    }
}

/// Resolves the ordered set of donor blood types compatible with `requested`.
///
/// Unrecognised codes resolve to `[requested]`.
pub fn compatible_types(requested: &BloodType) -> Vec<BloodType> {
    match requested {
        BloodType::Known(group) => eligible_donor_groups(*group)
            .iter()
            .copied()
            .map(BloodType::Known)
            .collect(),
        BloodType::Unrecognised(_) => vec![requested.clone()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(types: &[BloodType]) -> Vec<&str> {
        types.iter().map(BloodType::as_str).collect()
    }

    #[test]
    fn test_table_matches_transfusion_rules() {
        let expected: [(&str, &[&str]); 8] = [
            ("A+", &["A+", "A-", "O+", "O-"]),
            ("A-", &["A-", "O-"]),
            ("B+", &["B+", "B-", "O+", "O-"]),
            ("B-", &["B-", "O-"]),
            ("AB+", &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"]),
            ("AB-", &["A-", "B-", "AB-", "O-"]),
            ("O+", &["O+", "O-"]),
            ("O-", &["O-"]),
        ];

        for (requested, donors) in expected {
            let resolved = compatible_types(&BloodType::parse(requested));
            assert_eq!(codes(&resolved), donors, "requested {requested}");
        }
    }

    #[test]
    fn test_o_negative_only_receives_o_negative() {
        let resolved = compatible_types(&BloodType::parse("O-"));
        assert_eq!(resolved, vec![BloodType::Known(BloodGroup::ONegative)]);
    }

    #[test]
    fn test_ab_positive_receives_every_group() {
        let resolved = compatible_types(&BloodType::parse("AB+"));
        assert_eq!(resolved.len(), 8);
        for group in BloodGroup::ALL {
            assert!(resolved.contains(&BloodType::Known(group)), "missing {group}");
        }
    }

    #[test]
    fn test_unrecognised_code_falls_back_to_itself() {
        let resolved = compatible_types(&BloodType::parse("XX"));
        assert_eq!(resolved, vec![BloodType::Unrecognised("XX".into())]);
    }

    #[test]
    fn test_parse_is_exact_match() {
        assert!(BloodType::parse("AB-").is_canonical());
        assert!(!BloodType::parse("ab-").is_canonical());
        assert!(!BloodType::parse(" O+").is_canonical());
        assert_eq!(BloodType::parse("O +").as_str(), "O +");
    }

    #[test]
    fn test_codes_round_trip_through_from_code() {
        for group in BloodGroup::ALL {
            assert_eq!(BloodGroup::from_code(group.code()), Some(group));
        }
    }

    #[test]
    fn test_serde_uses_plain_code() {
        let json = serde_json::to_string(&BloodType::Known(BloodGroup::AbNegative)).unwrap();
        assert_eq!(json, "\"AB-\"");

        let parsed: BloodType = serde_json::from_str("\"Z?\"").unwrap();
        assert_eq!(parsed, BloodType::Unrecognised("Z?".into()));
    }
}
