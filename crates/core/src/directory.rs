//! The donor directory seam.
//!
//! The matcher works over an in-memory snapshot. [`DonorDirectory`] is how callers obtain that
//! snapshot, whatever backs it: [`DonorService`](crate::repositories::donors::DonorService)
//! reads sharded YAML files, [`InMemoryDirectory`] wraps a vector.

use crate::compatibility::BloodType;
use crate::matcher::DonorRecord;
use crate::CoreResult;

/// Source of donor snapshots for matching.
pub trait DonorDirectory {
    /// Opaque per-donor payload carried through matching.
    type Profile: Clone;

    /// Every donor, in a stable order.
    fn list_all(&self) -> CoreResult<Vec<DonorRecord<Self::Profile>>>;

    /// Donors whose blood type is one of `types`, preserving [`list_all`](Self::list_all) order.
    fn list_by_types(&self, types: &[BloodType]) -> CoreResult<Vec<DonorRecord<Self::Profile>>> {
        Ok(self
            .list_all()?
            .into_iter()
            .filter(|donor| types.contains(&donor.blood_type))
            .collect())
    }
}

/// A fixed, in-memory donor snapshot.
#[derive(Clone, Debug, Default)]
pub struct InMemoryDirectory<P> {
    donors: Vec<DonorRecord<P>>,
}

impl<P> InMemoryDirectory<P> {
    pub fn new(donors: Vec<DonorRecord<P>>) -> Self {
        Self { donors }
    }

    pub fn len(&self) -> usize {
        self.donors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.donors.is_empty()
    }
}

impl<P: Clone> DonorDirectory for InMemoryDirectory<P> {
    type Profile = P;

    fn list_all(&self) -> CoreResult<Vec<DonorRecord<P>>> {
        Ok(self.donors.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compatibility::compatible_types;
    use crate::geo::Coordinate;

    fn record(id: &str, blood_type: &str) -> DonorRecord<()> {
        DonorRecord {
            id: id.into(),
            blood_type: BloodType::parse(blood_type),
            coordinate: Coordinate::new(0.0, 0.0),
            profile: (),
        }
    }

    #[test]
    fn test_list_by_types_filters_and_keeps_order() {
        let directory = InMemoryDirectory::new(vec![
            record("1", "A+"),
            record("2", "O-"),
            record("3", "B+"),
            record("4", "A-"),
        ]);

        let found = directory
            .list_by_types(&compatible_types(&BloodType::parse("A+")))
            .expect("in-memory listing cannot fail");

        let ids: Vec<&str> = found.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
    }

    #[test]
    fn test_empty_directory() {
        let directory: InMemoryDirectory<()> = InMemoryDirectory::default();
        assert!(directory.is_empty());
        assert!(directory.list_all().unwrap().is_empty());
        assert!(directory.list_by_types(&[]).unwrap().is_empty());
    }
}
