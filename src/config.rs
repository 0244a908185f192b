use std::path::PathBuf;

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("taskflow")
}

/// Runtime configuration. The data directory holds one JSON blob file per
/// store key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub data_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl AppConfig {
    /// Resolves the config from an optional override (CLI flag or
    /// environment), falling back to the platform data directory.
    pub fn resolve(data_dir: Option<PathBuf>) -> Self {
        match data_dir {
            Some(dir) => Self { data_dir: dir },
            None => Self::default(),
        }
    }

    /// Ensure the data directory exists.
    pub fn ensure_dir(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.data_dir)
    }
}
