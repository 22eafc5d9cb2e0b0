//! Key-value string persistence.
//!
//! The registry treats storage as an opaque map of string keys to string
//! values; each value holds one serialized structured record. On disk the
//! whole map is a single JSON object in the platform data directory.

use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub struct KvStore {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl KvStore {
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = if cfg!(target_os = "linux") {
            dirs::data_dir()
                .context("Failed to get XDG data directory")?
                .join("guesthouse-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".guesthouse-cli")
        };

        if !data_dir.exists() {
            fs::create_dir_all(&data_dir)
                .with_context(|| format!("Failed to create data directory: {:?}", data_dir))?;
            info!("Created data directory: {:?}", data_dir);
        }

        Ok(data_dir.join("store.json"))
    }

    /// Opens the store at `path`. A missing file starts empty; an unreadable
    /// or unparsable file degrades to empty with a logged warning, never an
    /// error surfaced to the user.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<HashMap<String, String>>(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!("Discarding unparsable store {:?}: {}", path, e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("Failed to read store {:?}: {}", path, e);
                HashMap::new()
            }
        };
        debug!("Opened store {:?} with {} keys", path, values.len());
        Self { path, values }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn set(&mut self, key: impl Into<String>, value: String) -> Result<()> {
        self.values.insert(key.into(), value);
        self.persist()
    }

    pub fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    pub fn clear(&mut self) -> Result<()> {
        self.values.clear();
        self.persist()
    }

    /// Writes through a sibling temp file so a crash mid-write never leaves
    /// a truncated store behind.
    fn persist(&self) -> Result<()> {
        let content =
            serde_json::to_string_pretty(&self.values).context("Failed to serialize store")?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, content)
            .with_context(|| format!("Failed to write store temp file: {:?}", tmp))?;
        fs::rename(&tmp, &self.path)
            .with_context(|| format!("Failed to replace store file: {:?}", self.path))?;
        debug!("Persisted store {:?} ({} keys)", self.path, self.values.len());
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_os_string();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = KvStore::open(&path);
        store.set("guests", "[]".to_string()).unwrap();
        store.set("tm30.rows", "[{\"booking_id\":\"BK-1\"}]".to_string()).unwrap();

        let reopened = KvStore::open(&path);
        assert_eq!(reopened.get("guests"), Some("[]"));
        assert_eq!(reopened.get("tm30.rows"), Some("[{\"booking_id\":\"BK-1\"}]"));
    }

    #[test]
    fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = KvStore::open(dir.path().join("absent.json"));
        assert_eq!(store.get("guests"), None);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        fs::write(&path, "{not json").unwrap();

        let store = KvStore::open(&path);
        assert_eq!(store.get("guests"), None);
    }

    #[test]
    fn test_remove_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut store = KvStore::open(&path);
        store.set("guests", "[]".to_string()).unwrap();
        store.remove("guests").unwrap();

        let reopened = KvStore::open(&path);
        assert_eq!(reopened.get("guests"), None);
    }
}
