//! AssessmentReader - the one way downstream features read the stored record.
//!
//! Every failure mode (nothing stored, backend error, unparsable JSON, schema
//! violation) degrades to "no assessment" so a broken entry never takes the
//! host down.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::assessment::AnswerRecord;
use crate::ports::{PersistenceGateway, ASSESSMENT_STORAGE_KEY};

#[derive(Clone)]
pub struct AssessmentReader {
    gateway: Arc<dyn PersistenceGateway>,
    storage_key: String,
}

impl AssessmentReader {
    pub fn new(gateway: Arc<dyn PersistenceGateway>) -> Self {
        Self::with_storage_key(gateway, ASSESSMENT_STORAGE_KEY)
    }

    pub fn with_storage_key(
        gateway: Arc<dyn PersistenceGateway>,
        storage_key: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            storage_key: storage_key.into(),
        }
    }

    /// Returns the last completed assessment, or None if there is no usable one.
    pub fn load(&self) -> Option<AnswerRecord> {
        let raw = match self.gateway.read(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.storage_key, "no stored assessment");
                return None;
            }
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "could not read stored assessment");
                return None;
            }
        };

        let record: AnswerRecord = match serde_json::from_str(&raw) {
            Ok(record) => record,
            Err(e) => {
                warn!(key = %self.storage_key, error = %e, "stored assessment is not valid JSON for the record");
                return None;
            }
        };

        if let Err(e) = record.validate() {
            warn!(key = %self.storage_key, error = %e, "stored assessment violates the record schema");
            return None;
        }

        Some(record)
    }

    /// True when a usable assessment has been stored.
    pub fn has_completed(&self) -> bool {
        self.load().is_some()
    }
}
