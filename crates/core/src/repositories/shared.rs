//! Shared record-store utilities.
//!
//! Every repository stores one YAML file per record inside a sharded directory:
//!
//! ```text
//! <kind_dir>/
//!   <s1>/
//!     <s2>/
//!       <uuid>/
//!         <record>.yaml
//! ```
//!
//! These helpers allocate the directory, write the file, and walk the shards back into memory.

use crate::error::{CoreError, CoreResult};
use bloodlink_uuid::ShardableUuid;
use serde::{de::DeserializeOwned, Serialize};
use std::{
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

/// Creates a unique sharded directory within `base_dir`.
///
/// Retries up to 5 times with fresh identifiers if a candidate directory already exists.
///
/// # Errors
///
/// Returns `CoreError::RecordDirCreation` if directory creation fails or no unique directory
/// could be allocated.
pub(crate) fn create_uuid_and_shard_dir(
    base_dir: &Path,
    mut uuid_source: impl FnMut() -> ShardableUuid,
) -> CoreResult<(ShardableUuid, PathBuf)> {
    for _attempt in 0..5 {
        let uuid = uuid_source();
        let candidate = uuid.sharded_dir(base_dir);

        if candidate.exists() {
            continue;
        }

        if let Some(parent) = candidate.parent() {
            fs::create_dir_all(parent).map_err(CoreError::RecordDirCreation)?;
        }

        match fs::create_dir(&candidate) {
            Ok(()) => return Ok((uuid, candidate)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(CoreError::RecordDirCreation(e)),
        }
    }

    Err(CoreError::RecordDirCreation(io::Error::new(
        ErrorKind::AlreadyExists,
        "failed to allocate a unique record directory after 5 attempts",
    )))
}

/// Serialises `record` as YAML into `record_dir/filename`.
///
/// If the write fails the freshly allocated `record_dir` is removed again, so a half-written
/// record never shows up in listings.
pub(crate) fn write_yaml_record<T: Serialize>(
    record_dir: &Path,
    filename: &str,
    record: &T,
) -> CoreResult<()> {
    let result = serde_yaml::to_string(record)
        .map_err(CoreError::YamlSerialization)
        .and_then(|yaml| {
            fs::write(record_dir.join(filename), yaml).map_err(CoreError::FileWrite)
        });

    if let Err(e) = &result {
        tracing::error!("writing {} failed: {}", record_dir.display(), e);
        if let Err(cleanup) = fs::remove_dir_all(record_dir) {
            tracing::warn!(
                "failed to clean up record directory {}: {}",
                record_dir.display(),
                cleanup
            );
        }
    }

    result
}

/// Collects every `<s1>/<s2>/<uuid>/filename` path under `base_dir` as `(id, path)` pairs.
///
/// A missing `base_dir` yields an empty list. Directories whose name is not a canonical id are
/// skipped with a warning.
fn sharded_record_paths(base_dir: &Path, filename: &str) -> Vec<(String, PathBuf)> {
    let mut paths = Vec::new();

    let s1_iter = match fs::read_dir(base_dir) {
        Ok(it) => it,
        Err(_) => return paths,
    };

    for s1 in s1_iter.flatten() {
        let s1_path = s1.path();
        if !s1_path.is_dir() {
            continue;
        }

        let s2_iter = match fs::read_dir(&s1_path) {
            Ok(it) => it,
            Err(_) => continue,
        };

        for s2 in s2_iter.flatten() {
            let s2_path = s2.path();
            if !s2_path.is_dir() {
                continue;
            }

            let id_iter = match fs::read_dir(&s2_path) {
                Ok(it) => it,
                Err(_) => continue,
            };

            for id_ent in id_iter.flatten() {
                let id_path = id_ent.path();
                let record_path = id_path.join(filename);
                if !record_path.is_file() {
                    continue;
                }

                let id = id_path
                    .file_name()
                    .and_then(|os| os.to_str())
                    .unwrap_or("")
                    .to_string();
                if !ShardableUuid::is_canonical(&id) {
                    tracing::warn!("skipping non-canonical record dir: {}", id_path.display());
                    continue;
                }

                paths.push((id, record_path));
            }
        }
    }

    paths
}

/// Reads every `<s1>/<s2>/<uuid>/filename` under `base_dir`.
///
/// Returns `(id, record)` pairs in no particular order. A missing `base_dir` yields an empty
/// list; unreadable or unparseable files are skipped with a warning.
pub(crate) fn read_sharded_records<T: DeserializeOwned>(
    base_dir: &Path,
    filename: &str,
) -> Vec<(String, T)> {
    let mut records = Vec::new();

    for (id, record_path) in sharded_record_paths(base_dir, filename) {
        let contents = match fs::read_to_string(&record_path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!("failed to read {}: {}", record_path.display(), e);
                continue;
            }
        };

        match serde_yaml::from_str::<T>(&contents) {
            Ok(record) => records.push((id, record)),
            Err(e) => tracing::warn!("failed to parse {}: {}", record_path.display(), e),
        }
    }

    records
}

/// Like [`read_sharded_records`], but any record that cannot be read or parsed as `T` is an
/// error.
///
/// Used where a skipped record would make a check pass that should fail.
///
/// # Errors
///
/// Returns `CoreError::FileRead` or `CoreError::YamlDeserialization` for the first bad record.
pub(crate) fn read_sharded_records_strict<T: DeserializeOwned>(
    base_dir: &Path,
    filename: &str,
) -> CoreResult<Vec<(String, T)>> {
    sharded_record_paths(base_dir, filename)
        .into_iter()
        .map(|(id, record_path)| {
            let contents = fs::read_to_string(&record_path).map_err(CoreError::FileRead)?;
            let record =
                serde_yaml::from_str::<T>(&contents).map_err(CoreError::YamlDeserialization)?;
            Ok((id, record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Note {
        text: String,
    }

    #[test]
    fn test_write_then_read_records() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("notes");

        let (id, dir) = create_uuid_and_shard_dir(&base, ShardableUuid::new)
            .expect("allocation should succeed");
        write_yaml_record(&dir, "note.yaml", &Note { text: "hello".into() })
            .expect("write should succeed");

        let records: Vec<(String, Note)> = read_sharded_records(&base, "note.yaml");
        assert_eq!(records, vec![(id.to_string(), Note { text: "hello".into() })]);
    }

    #[test]
    fn test_allocation_retries_on_existing_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let taken = ShardableUuid::new();
        fs::create_dir_all(taken.sharded_dir(base)).unwrap();
        let fresh = ShardableUuid::new();

        let mut ids = vec![fresh.clone(), taken.clone()];
        let (allocated, _) =
            create_uuid_and_shard_dir(base, || ids.pop().expect("ran out of ids")).unwrap();

        assert_eq!(allocated, fresh);
    }

    #[test]
    fn test_allocation_gives_up_after_five_collisions() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let taken = ShardableUuid::new();
        fs::create_dir_all(taken.sharded_dir(base)).unwrap();

        let err = create_uuid_and_shard_dir(base, || taken.clone())
            .expect_err("every candidate exists");
        assert!(matches!(err, CoreError::RecordDirCreation(_)));
    }

    #[test]
    fn test_read_skips_invalid_yaml_and_missing_dir() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("notes");

        assert!(read_sharded_records::<Note>(&base, "note.yaml").is_empty());

        let bad = ShardableUuid::new().sharded_dir(&base);
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("note.yaml"), "text: [[[").unwrap();

        assert!(read_sharded_records::<Note>(&base, "note.yaml").is_empty());
    }

    #[test]
    fn test_strict_read_fails_on_unparseable_record() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path().join("notes");

        assert!(read_sharded_records_strict::<Note>(&base, "note.yaml")
            .unwrap()
            .is_empty());

        let (id, dir) = create_uuid_and_shard_dir(&base, ShardableUuid::new).unwrap();
        write_yaml_record(&dir, "note.yaml", &Note { text: "kept".into() }).unwrap();
        let records = read_sharded_records_strict::<Note>(&base, "note.yaml").unwrap();
        assert_eq!(records, vec![(id.to_string(), Note { text: "kept".into() })]);

        let bad = ShardableUuid::new().sharded_dir(&base);
        fs::create_dir_all(&bad).unwrap();
        fs::write(bad.join("note.yaml"), "text: [[[").unwrap();

        let err = read_sharded_records_strict::<Note>(&base, "note.yaml")
            .expect_err("a broken record must not be skipped");
        assert!(matches!(err, CoreError::YamlDeserialization(_)));
    }
}
