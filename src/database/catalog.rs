//! Catalog table access
//!
//! Queries over the `files` table, all taking a borrowed [`Session`] so the
//! caller decides the transactional scope. One row per archived object,
//! keyed by its (bucket, key) location.

use crate::database::session::Session;
use crate::domain::{ArchiveRecord, NewArchiveRecord, ObjectLocation, Result};
use chrono::{DateTime, Utc};
use tokio_postgres::Row;

/// Summary counters for the status command
#[derive(Debug, Clone)]
pub struct CatalogStats {
    /// Number of catalog rows
    pub file_count: i64,

    /// Sum of archived file sizes in bytes
    pub total_bytes: i64,

    /// Most recent row update, if any rows exist
    pub last_updated: Option<DateTime<Utc>>,
}

/// Insert or refresh the row for an archived object
///
/// A re-archive of the same (bucket, key) updates the existing row's local
/// path, checksum, size and `updated_at`.
pub async fn upsert_record(
    session: &Session,
    record: &NewArchiveRecord,
) -> Result<ArchiveRecord> {
    let row = session
        .query_one(
            "INSERT INTO files (local_path, bucket, object_key, checksum, size_bytes) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (bucket, object_key) DO UPDATE SET \
                 local_path = EXCLUDED.local_path, \
                 checksum = EXCLUDED.checksum, \
                 size_bytes = EXCLUDED.size_bytes, \
                 updated_at = now() \
             RETURNING id, local_path, bucket, object_key, checksum, size_bytes, \
                       created_at, updated_at",
            &[
                &record.local_path,
                &record.location.bucket,
                &record.location.key,
                &record.checksum,
                &record.size_bytes,
            ],
        )
        .await?;

    record_from_row(&row)
}

/// Look up the catalog row for a location
pub async fn find_by_location(
    session: &Session,
    location: &ObjectLocation,
) -> Result<Option<ArchiveRecord>> {
    let row = session
        .query_opt(
            "SELECT id, local_path, bucket, object_key, checksum, size_bytes, \
                    created_at, updated_at \
             FROM files WHERE bucket = $1 AND object_key = $2",
            &[&location.bucket, &location.key],
        )
        .await?;

    row.as_ref().map(record_from_row).transpose()
}

/// Rows under a bucket/prefix whose last update is older than the cutoff
pub async fn stale_records(
    session: &Session,
    bucket: &str,
    prefix: &str,
    cutoff: DateTime<Utc>,
) -> Result<Vec<ArchiveRecord>> {
    let pattern = format!("{}%", escape_like(prefix));
    let rows = session
        .query(
            "SELECT id, local_path, bucket, object_key, checksum, size_bytes, \
                    created_at, updated_at \
             FROM files \
             WHERE bucket = $1 AND object_key LIKE $2 AND updated_at < $3 \
             ORDER BY updated_at",
            &[&bucket, &pattern, &cutoff],
        )
        .await?;

    rows.iter().map(record_from_row).collect()
}

/// Delete the row for a location, returning whether one existed
pub async fn delete_by_location(session: &Session, location: &ObjectLocation) -> Result<bool> {
    let deleted = session
        .execute(
            "DELETE FROM files WHERE bucket = $1 AND object_key = $2",
            &[&location.bucket, &location.key],
        )
        .await?;

    Ok(deleted > 0)
}

/// Aggregate counters over the whole catalog
pub async fn stats(session: &Session) -> Result<CatalogStats> {
    let row = session
        .query_one(
            "SELECT COUNT(*) AS file_count, \
                    COALESCE(SUM(size_bytes), 0)::BIGINT AS total_bytes, \
                    MAX(updated_at) AS last_updated \
             FROM files",
            &[],
        )
        .await?;

    Ok(CatalogStats {
        file_count: row.try_get("file_count")?,
        total_bytes: row.try_get("total_bytes")?,
        last_updated: row.try_get("last_updated")?,
    })
}

fn record_from_row(row: &Row) -> Result<ArchiveRecord> {
    Ok(ArchiveRecord {
        id: row.try_get("id")?,
        local_path: row.try_get("local_path")?,
        location: ObjectLocation {
            bucket: row.try_get("bucket")?,
            key: row.try_get("object_key")?,
        },
        checksum: row.try_get("checksum")?,
        size_bytes: row.try_get("size_bytes")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

// LIKE patterns treat % and _ as wildcards; prefixes are literals.
fn escape_like(prefix: &str) -> String {
    prefix
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passthrough() {
        assert_eq!(escape_like("2026/reports/"), "2026/reports/");
    }

    #[test]
    fn test_escape_like_wildcards() {
        assert_eq!(escape_like("a%b_c"), "a\\%b\\_c");
        assert_eq!(escape_like("a\\b"), "a\\\\b");
    }
}
