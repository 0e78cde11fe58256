//! File-backed verdict store.
//!
//! Each partition is a JSON array in its own file under the data directory.
//! Reads never fail: a missing or unparsable file is an empty partition.
//! Appends are read-modify-write, serialized through one async mutex per store
//! and published with a rename so readers never see a partial file.

use std::path::{Path, PathBuf};

use serde_json::Value;
use tokio::sync::Mutex;

use crate::error::{StoreError, StoreResult};
use crate::models::lenient::publication_id_from_value;
use crate::models::{Partition, SkipSet, VerdictEntry};

/// Key holding the publication ID inside a verdict object.
const PUBLICATION_ID_KEY: &str = "Publication ID";

/// Append-only store of reviewer verdicts.
pub struct VerdictStore {
    data_dir: PathBuf,
    write_lock: Mutex<()>,
}

impl VerdictStore {
    /// Create a store rooted at `data_dir`. Nothing is touched until the first append.
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into(), write_lock: Mutex::new(()) }
    }

    /// Directory holding the partition files.
    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Path of a partition file.
    #[must_use]
    pub fn path(&self, partition: Partition) -> PathBuf {
        self.data_dir.join(partition.file_name())
    }

    /// Append a verdict to a partition.
    ///
    /// Existing elements are written back unchanged. Entries are not
    /// deduplicated: appending the same verdict twice stores it twice.
    pub async fn append(&self, partition: Partition, entry: &VerdictEntry) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.read_raw(partition).await;
        entries.push(serde_json::to_value(entry)?);

        self.write_raw(partition, &entries).await?;

        tracing::info!(
            partition = %partition,
            publication_id = %entry.publication_id,
            doi = %entry.doi,
            total = entries.len(),
            "Recorded verdict"
        );
        Ok(())
    }

    /// IDs present in either partition, for navigation.
    pub async fn skip_set(&self) -> SkipSet {
        let mut set = SkipSet::new();
        for partition in Partition::ALL {
            for value in self.read_raw(partition).await {
                match value.get(PUBLICATION_ID_KEY).and_then(publication_id_from_value) {
                    Some(id) => {
                        set.insert(&id);
                    }
                    None => {
                        tracing::warn!(partition = %partition, "Ignoring verdict without publication ID");
                    }
                }
            }
        }
        set
    }

    /// All well-formed entries of a partition, in file order.
    pub async fn snapshot(&self, partition: Partition) -> Vec<VerdictEntry> {
        self.read_raw(partition)
            .await
            .into_iter()
            .filter_map(|value| match serde_json::from_value(value) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::warn!(partition = %partition, error = %e, "Skipping malformed verdict");
                    None
                }
            })
            .collect()
    }

    /// Number of elements in a partition, well-formed or not.
    pub async fn count(&self, partition: Partition) -> usize {
        self.read_raw(partition).await.len()
    }

    /// Read a partition as raw JSON values, degrading to empty.
    async fn read_raw(&self, partition: Partition) -> Vec<Value> {
        let path = self.path(partition);

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Unreadable verdict file, treating as empty");
                return Vec::new();
            }
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Vec::new();
        }

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                tracing::warn!(path = %path.display(), "Verdict file is not a JSON array, treating as empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Corrupt verdict file, treating as empty");
                Vec::new()
            }
        }
    }

    /// Replace a partition file with `entries`.
    async fn write_raw(&self, partition: Partition, entries: &[Value]) -> StoreResult<()> {
        tokio::fs::create_dir_all(&self.data_dir)
            .await
            .map_err(|e| StoreError::io(&self.data_dir, e))?;

        let path = self.path(partition);
        let tmp = self
            .data_dir
            .join(format!(".{}.{}.tmp", partition.file_name(), uuid::Uuid::new_v4().simple()));

        let body = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&tmp, body).await.map_err(|e| StoreError::io(&tmp, e))?;

        if let Err(e) = tokio::fs::rename(&tmp, &path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(StoreError::io(&path, e));
        }
        Ok(())
    }
}

impl std::fmt::Debug for VerdictStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerdictStore").field("data_dir", &self.data_dir).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str) -> VerdictEntry {
        VerdictEntry {
            publication_id: id.into(),
            title: "Title".into(),
            doi: format!("10.1/{id}"),
            authors: "Smith,A".into(),
            reason: None,
            orcids: None,
            reviewed_at: None,
        }
    }

    #[tokio::test]
    async fn test_missing_dir_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = VerdictStore::new(dir.path().join("not-yet-created"));
        assert!(store.skip_set().await.is_empty());
        assert!(store.snapshot(Partition::Verified).await.is_empty());
    }

    #[tokio::test]
    async fn test_append_creates_dir_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = VerdictStore::new(dir.path().join("verdicts"));

        store.append(Partition::Problematic, &entry("5")).await.unwrap();

        assert!(store.path(Partition::Problematic).exists());
        assert!(!store.path(Partition::Verified).exists());
        assert_eq!(store.snapshot(Partition::Problematic).await, vec![entry("5")]);
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = VerdictStore::new(dir.path());
        store.append(Partition::Verified, &entry("1")).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["verified.json".to_string()]);
    }
}
