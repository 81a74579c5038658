//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::adapters::storage::validate_key;
use crate::ports::ASSESSMENT_STORAGE_KEY;

/// Where the finished assessment is persisted
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Directory holding one JSON file per key
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Key the assessment record is stored under
    #[serde(default = "default_assessment_key")]
    pub assessment_key: String,
}

impl StorageConfig {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptyDataDir);
        }
        if self.assessment_key.trim().is_empty() {
            return Err(ValidationError::EmptyStorageKey);
        }
        validate_key(&self.assessment_key)
            .map_err(|_| ValidationError::InvalidStorageKey(self.assessment_key.clone()))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            assessment_key: default_assessment_key(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_assessment_key() -> String {
    ASSESSMENT_STORAGE_KEY.to_string()
}
