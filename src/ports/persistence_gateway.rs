//! Persistence Gateway Port - durable key/value storage for finished assessments.
//!
//! The controller writes the frozen record here exactly once, at finalize.
//! Downstream features read it back through `AssessmentReader`. Writes to the
//! same key are last-writer-wins; concurrent wizards do not merge.

use thiserror::Error;

/// Key under which the finished assessment is stored.
pub const ASSESSMENT_STORAGE_KEY: &str = "assessmentData";

/// Errors that can occur during gateway operations
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to serialize record: {0}")]
    SerializationFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Port for a synchronous string key/value store.
///
/// Values are opaque serialized text; the gateway never interprets them, so a
/// corrupted entry can be read back and must be handled by the caller.
pub trait PersistenceGateway: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    /// `Ok(None)` when nothing is stored under the key
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), PersistenceError>;
}
