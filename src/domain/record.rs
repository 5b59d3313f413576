//! Archive catalog records
//!
//! Rows of the `files` catalog table. Every archived object gets one row
//! keyed by its (bucket, key) location.

use crate::domain::location::ObjectLocation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `files` catalog table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveRecord {
    /// Catalog row id
    pub id: i64,

    /// Path of the local file that was archived
    pub local_path: String,

    /// Where the object lives in cloud storage
    pub location: ObjectLocation,

    /// SHA-256 of the file contents, hex-encoded
    pub checksum: String,

    /// Size of the archived file in bytes
    pub size_bytes: i64,

    /// When the row was first created
    pub created_at: DateTime<Utc>,

    /// When the row was last updated
    pub updated_at: DateTime<Utc>,
}

/// Data for a catalog row that has not been inserted yet
///
/// Produced by the archive workflow; the catalog assigns id and timestamps.
#[derive(Debug, Clone)]
pub struct NewArchiveRecord {
    /// Path of the local file being archived
    pub local_path: String,

    /// Destination of the upload
    pub location: ObjectLocation,

    /// SHA-256 of the file contents, hex-encoded
    pub checksum: String,

    /// Size of the file in bytes
    pub size_bytes: i64,
}
