use std::path::PathBuf;

pub const DEFAULT_DATA_DIR: &str = "./tabula_db";

/// Where the file store keeps its records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub data_dir: PathBuf,
}

impl DbConfig {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }
}

impl Default for DbConfig {
    fn default() -> Self {
        Self::new(DEFAULT_DATA_DIR)
    }
}
