use std::path::PathBuf;

use super::{StorageError, StorageProvider};

/// File-backed provider keeping one `<key>.json` file per blob under a root
/// directory. The directory must exist before the first write.
#[derive(Debug)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn blob_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl StorageProvider for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.blob_path(key);
        if !path.exists() {
            return None;
        }
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        std::fs::write(self.blob_path(key), value).map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_blob_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        assert_eq!(storage.get("tasks"), None);
    }

    #[test]
    fn set_writes_a_json_file_per_key() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("taskflow-tasks", "[]").unwrap();
        assert!(dir.path().join("taskflow-tasks.json").exists());
        assert_eq!(storage.get("taskflow-tasks").as_deref(), Some("[]"));
    }

    #[test]
    fn set_overwrites_previous_value() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("k", "old").unwrap();
        storage.set("k", "new").unwrap();
        assert_eq!(storage.get("k").as_deref(), Some("new"));
    }

    #[test]
    fn write_into_a_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("does-not-exist"));
        assert!(storage.set("k", "v").is_err());
    }
}
