//! Archive and restore workflows
//!
//! The [`Archiver`] composes the storage facade and the database: a file is
//! fingerprinted, uploaded, and recorded in the catalog; a restore downloads
//! the object and verifies the digest against the catalog row.

use crate::core::checksum;
use crate::database::{catalog, Database};
use crate::domain::{
    ArchiveRecord, CaspianError, NewArchiveRecord, ObjectLocation, Result,
};
use crate::storage::{CloudManager, ObjectStore};
use std::path::Path;
use std::sync::Arc;

/// Coordinates uploads with catalog bookkeeping
pub struct Archiver {
    storage: Arc<CloudManager>,
    database: Arc<Database>,
}

impl Archiver {
    /// Create a new archiver over shared storage and database handles
    pub fn new(storage: Arc<CloudManager>, database: Arc<Database>) -> Self {
        Self { storage, database }
    }

    /// Archive a local file to the given location
    ///
    /// The upload happens outside the session; the catalog upsert is the
    /// transactional unit. A failed upsert leaves the uploaded object in
    /// place but uncataloged, and a re-run converges.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `file_path` is not a regular file, an
    /// I/O error if it cannot be read, and storage/database errors
    /// unchanged from the underlying layers.
    pub async fn archive_file(
        &self,
        file_path: &Path,
        location: &ObjectLocation,
    ) -> Result<ArchiveRecord> {
        let metadata = tokio::fs::metadata(file_path).await.map_err(|err| {
            CaspianError::Io(format!("Failed to stat {}: {err}", file_path.display()))
        })?;
        if !metadata.is_file() {
            return Err(CaspianError::Validation(format!(
                "{} is not a regular file",
                file_path.display()
            )));
        }

        crate::log_archive_start!(file_path, location);

        let digest = checksum::file_sha256(file_path).await?;
        self.storage
            .upload_object(file_path, &location.bucket, &location.key)
            .await?;

        let new_record = NewArchiveRecord {
            local_path: file_path.display().to_string(),
            location: location.clone(),
            checksum: digest,
            size_bytes: metadata.len() as i64,
        };

        let session = self.database.session(false).await?;
        let record = catalog::upsert_record(&session, &new_record).await?;
        session.commit().await?;

        crate::log_archive_complete!(location, record.size_bytes);
        Ok(record)
    }

    /// Restore an archived object into a local file
    ///
    /// Looks up the catalog row (on the read-only pool when one is
    /// configured), downloads the object, and verifies the SHA-256 digest
    /// of the downloaded file against the recorded checksum.
    ///
    /// # Errors
    ///
    /// Returns a validation error if the location has no catalog row or the
    /// digest does not match the catalog.
    pub async fn restore_file(
        &self,
        location: &ObjectLocation,
        file_path: &Path,
    ) -> Result<ArchiveRecord> {
        let readonly = self.database.has_readonly();
        let lookup = location.clone();
        let record = self
            .database
            .with_session(readonly, |session| {
                Box::pin(async move { catalog::find_by_location(session, &lookup).await })
            })
            .await?
            .ok_or_else(|| {
                CaspianError::Validation(format!("No catalog entry for {location}"))
            })?;

        self.storage
            .download_object(&location.bucket, &location.key, file_path)
            .await?;

        let digest = checksum::file_sha256(file_path).await?;
        if digest != record.checksum {
            return Err(CaspianError::Validation(format!(
                "Checksum mismatch for {location}: catalog has {}, downloaded file has {digest}",
                record.checksum
            )));
        }

        tracing::info!(
            location = %location,
            path = %file_path.display(),
            "Restore complete"
        );
        Ok(record)
    }
}
