pub mod file;
pub mod memory;

use thiserror::Error;

/// Blob key holding the serialized task list.
pub const TASKS_KEY: &str = "taskflow-tasks";
/// Blob key holding the serialized project list.
pub const PROJECTS_KEY: &str = "taskflow-projects";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write key '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Keyed string-blob persistence.
///
/// `get` swallows read failures: a missing or unreadable blob reads as
/// absent, which callers treat as first-run state.
pub trait StorageProvider {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
