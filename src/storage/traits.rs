//! Object storage abstraction traits
//!
//! This module defines the interface that object-storage providers must
//! implement. `move_object` and `transfer_object` are provided methods built
//! on the `copy_object` + `delete_object` primitives, so every provider
//! inherits server-side copy-then-delete semantics.

use crate::domain::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;
use std::path::Path;

/// Lazy, one-shot stream of object keys
///
/// Pagination happens transparently as the stream is polled. The stream is
/// finite and not restartable; call `list_objects` again for a fresh pass.
pub type KeyStream = BoxStream<'static, Result<String>>;

/// Interface to one provider's object storage
///
/// Objects are addressed by (bucket, key). Operations surface provider
/// failures unchanged in meaning; nothing is retried at this layer.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload a local file to cloud storage
    ///
    /// # Arguments
    ///
    /// * `file_path` - Path of the local file to upload
    /// * `bucket` - Bucket to store the object in
    /// * `key` - Key of the object
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read, or a storage error
    /// if the provider call fails. A failed upload leaves no guarantee
    /// about remote state.
    async fn upload_object(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()>;

    /// Download an object from cloud storage into a local file
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::ObjectNotFound`](crate::domain::StorageError)
    /// if the object does not exist, or an I/O error if the local path
    /// cannot be written.
    async fn download_object(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()>;

    /// Copy an object server-side, possibly across buckets
    ///
    /// The primitive both [`move_object`](Self::move_object) and
    /// [`transfer_object`](Self::transfer_object) build on. The object body
    /// never travels through this process.
    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()>;

    /// Delete an object from cloud storage
    ///
    /// Idempotency for missing keys is the provider's contract, not
    /// verified here.
    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()>;

    /// List object keys under a prefix
    ///
    /// Ordering matches the provider's listing order.
    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<KeyStream>;

    /// Move an object within one bucket
    ///
    /// A same-bucket server-side copy followed by an optional delete of the
    /// source.
    async fn move_object(
        &self,
        bucket: &str,
        key: &str,
        dest_key: &str,
        delete_source: bool,
    ) -> Result<()> {
        self.transfer_object(bucket, key, bucket, dest_key, delete_source)
            .await
    }

    /// Transfer an object to another bucket
    ///
    /// Server-side copy to (dest_bucket, dest_key), then an optional delete
    /// of the source. If the delete fails the copy is not undone; the
    /// object exists at both locations.
    async fn transfer_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
        delete_source: bool,
    ) -> Result<()> {
        self.copy_object(bucket, key, dest_bucket, dest_key).await?;
        if delete_source {
            self.delete_object(bucket, key).await?;
        }
        Ok(())
    }
}
