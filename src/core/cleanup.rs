//! Stale archive cleanup
//!
//! Removes archived objects whose catalog rows have not been touched since
//! a cutoff, then deletes the rows themselves in one write session.

use crate::database::{catalog, Database};
use crate::domain::Result;
use crate::storage::{CloudManager, ObjectStore};
use chrono::{Duration, Utc};
use std::sync::Arc;

/// Outcome of one cleanup run
#[derive(Debug, Clone, Default)]
pub struct CleanupSummary {
    /// Stale rows found under the bucket/prefix
    pub examined: usize,

    /// Objects deleted from storage
    pub deleted_objects: usize,

    /// Catalog rows removed
    pub deleted_records: usize,

    /// Whether this was a dry run
    pub dry_run: bool,
}

/// Runs cleanup passes over one bucket/prefix
pub struct CleanupRunner {
    storage: Arc<CloudManager>,
    database: Arc<Database>,
}

impl CleanupRunner {
    /// Create a new cleanup runner over shared storage and database handles
    pub fn new(storage: Arc<CloudManager>, database: Arc<Database>) -> Self {
        Self { storage, database }
    }

    /// Delete objects not updated within `max_age`
    ///
    /// The stale set is read in a read-only session when one is configured.
    /// With `dry_run` the candidates are only logged. Otherwise each object
    /// is deleted from storage first, then all rows are removed in a single
    /// write session; if that session fails, the rows roll back and the
    /// next run re-examines them (object deletes are idempotent).
    pub async fn run(
        &self,
        bucket: &str,
        prefix: &str,
        max_age: Duration,
        dry_run: bool,
    ) -> Result<CleanupSummary> {
        let cutoff = Utc::now() - max_age;
        tracing::info!(bucket, prefix, %cutoff, dry_run, "Starting cleanup");

        let readonly = self.database.has_readonly();
        let stale_bucket = bucket.to_string();
        let stale_prefix = prefix.to_string();
        let stale = self
            .database
            .with_session(readonly, |session| {
                Box::pin(async move {
                    catalog::stale_records(session, &stale_bucket, &stale_prefix, cutoff).await
                })
            })
            .await?;

        let mut summary = CleanupSummary {
            examined: stale.len(),
            dry_run,
            ..CleanupSummary::default()
        };

        if dry_run {
            for record in &stale {
                tracing::info!(
                    location = %record.location,
                    updated_at = %record.updated_at,
                    "Would delete"
                );
            }
            return Ok(summary);
        }

        for record in &stale {
            self.storage
                .delete_object(&record.location.bucket, &record.location.key)
                .await?;
            summary.deleted_objects += 1;
        }

        let session = self.database.session(false).await?;
        for record in &stale {
            if catalog::delete_by_location(&session, &record.location).await? {
                summary.deleted_records += 1;
            }
        }
        session.commit().await?;

        tracing::info!(
            examined = summary.examined,
            deleted_objects = summary.deleted_objects,
            deleted_records = summary.deleted_records,
            "Cleanup complete"
        );
        Ok(summary)
    }
}
