//! File-based Persistence Gateway
//!
//! Stores each key as `<key>.json` under a base directory, so a finished
//! assessment survives process restarts the way browser storage survives a
//! page reload.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::ports::{PersistenceError, PersistenceGateway};

/// File-based key/value store
#[derive(Debug, Clone)]
pub struct FileGateway {
    base_path: PathBuf,
}

impl FileGateway {
    /// Create a new file store rooted at `base_path`
    ///
    /// The directory is created on first write.
    ///
    /// # Example
    /// ```ignore
    /// let gateway = FileGateway::new("./data");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Get the file path for a key
    fn entry_path(&self, key: &str) -> Result<PathBuf, PersistenceError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.json", key)))
    }
}

/// Keys become file names, so they must not escape the base directory.
pub(crate) fn validate_key(key: &str) -> Result<(), PersistenceError> {
    let invalid = key.is_empty()
        || key.starts_with('.')
        || key.contains(['/', '\\'])
        || key.chars().any(char::is_control);
    if invalid {
        Err(PersistenceError::InvalidKey(key.to_string()))
    } else {
        Ok(())
    }
}

fn io_error(err: std::io::Error) -> PersistenceError {
    PersistenceError::IoError(err.to_string())
}

impl PersistenceGateway for FileGateway {
    fn read(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.entry_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(e)),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let path = self.entry_path(key)?;
        fs::create_dir_all(&self.base_path).map_err(io_error)?;

        // Write to a sibling file and rename so readers never see a partial record.
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(io_error)?;
        fs::rename(&tmp, &path).map_err(io_error)?;

        debug!(path = %path.display(), "stored entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PersistenceError> {
        let path = self.entry_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn gateway() -> (TempDir, FileGateway) {
        let dir = TempDir::new().unwrap();
        let gateway = FileGateway::new(dir.path().join("store"));
        (dir, gateway)
    }

    #[test]
    fn read_before_any_write_returns_none() {
        let (_dir, gateway) = gateway();
        assert_eq!(gateway.read("assessmentData").unwrap(), None);
    }

    #[test]
    fn write_creates_directory_and_json_file() {
        let (_dir, gateway) = gateway();
        gateway.write("assessmentData", r#"{"age":30}"#).unwrap();

        let path = gateway.base_path().join("assessmentData.json");
        assert_eq!(fs::read_to_string(path).unwrap(), r#"{"age":30}"#);
        assert!(!gateway.base_path().join("assessmentData.json.tmp").exists());
    }

    #[test]
    fn value_survives_a_new_gateway_instance() {
        let (_dir, gateway) = gateway();
        gateway.write("assessmentData", "stored").unwrap();

        let reopened = FileGateway::new(gateway.base_path());
        assert_eq!(
            reopened.read("assessmentData").unwrap().as_deref(),
            Some("stored")
        );
    }

    #[test]
    fn overwrite_replaces_value() {
        let (_dir, gateway) = gateway();
        gateway.write("k", "one").unwrap();
        gateway.write("k", "two").unwrap();
        assert_eq!(gateway.read("k").unwrap().as_deref(), Some("two"));
    }

    #[test]
    fn remove_is_idempotent() {
        let (_dir, gateway) = gateway();
        gateway.write("k", "v").unwrap();
        gateway.remove("k").unwrap();
        gateway.remove("k").unwrap();
        assert_eq!(gateway.read("k").unwrap(), None);
    }

    #[test]
    fn keys_that_escape_the_directory_are_rejected() {
        let (_dir, gateway) = gateway();
        for key in ["", "../evil", "a/b", "a\\b", ".hidden"] {
            assert!(
                matches!(gateway.write(key, "x"), Err(PersistenceError::InvalidKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }
}
