//! Object location value type
//!
//! Every object-storage operation addresses a named byte blob by a
//! (bucket, key) pair. [`ObjectLocation`] materializes that pair so the
//! catalog and the CLI can pass it around as a single value.

use crate::domain::errors::CaspianError;
use crate::domain::result::Result;
use serde::{Deserialize, Serialize};

/// Address of an object in cloud storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectLocation {
    /// Bucket holding the object
    pub bucket: String,

    /// Key of the object within the bucket
    pub key: String,
}

impl ObjectLocation {
    /// Create a new object location
    ///
    /// # Errors
    ///
    /// Returns a validation error if the bucket or key is empty.
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Result<Self> {
        let bucket = bucket.into();
        let key = key.into();

        if bucket.is_empty() {
            return Err(CaspianError::Validation(
                "Object location bucket cannot be empty".to_string(),
            ));
        }
        if key.is_empty() {
            return Err(CaspianError::Validation(
                "Object location key cannot be empty".to_string(),
            ));
        }

        Ok(Self { bucket, key })
    }
}

impl std::fmt::Display for ObjectLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.bucket, self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let location = ObjectLocation::new("archive", "a/b.txt").unwrap();
        assert_eq!(location.bucket, "archive");
        assert_eq!(location.key, "a/b.txt");
    }

    #[test]
    fn test_new_empty_bucket() {
        let result = ObjectLocation::new("", "a/b.txt");
        assert!(matches!(result, Err(CaspianError::Validation(_))));
    }

    #[test]
    fn test_new_empty_key() {
        let result = ObjectLocation::new("archive", "");
        assert!(matches!(result, Err(CaspianError::Validation(_))));
    }

    #[test]
    fn test_display() {
        let location = ObjectLocation::new("archive", "2026/report.csv").unwrap();
        assert_eq!(location.to_string(), "archive/2026/report.csv");
    }
}
