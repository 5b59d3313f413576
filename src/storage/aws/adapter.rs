//! AWS object store adapter
//!
//! Implements the [`ObjectStore`] trait on top of [`S3Client`]. The
//! `move_object`/`transfer_object` provided methods apply unchanged: both
//! resolve to a server-side copy followed by an optional delete.

use crate::domain::Result;
use crate::storage::aws::client::S3Client;
use crate::storage::traits::{KeyStream, ObjectStore};
use crate::storage::ProviderConfig;
use async_trait::async_trait;
use std::path::Path;

/// AWS S3 implementation of [`ObjectStore`]
pub struct AwsObjectStore {
    client: S3Client,
}

impl AwsObjectStore {
    /// Create a new AWS object store
    ///
    /// Construction is cheap; the SDK client is built on first use.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            client: S3Client::new(config),
        }
    }
}

#[async_trait]
impl ObjectStore for AwsObjectStore {
    async fn upload_object(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()> {
        self.client.upload(file_path, bucket, key).await
    }

    async fn download_object(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()> {
        self.client.download(bucket, key, file_path).await
    }

    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        self.client.copy(bucket, key, dest_bucket, dest_key).await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.client.delete(bucket, key).await
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<KeyStream> {
        self.client.list(bucket, prefix).await
    }
}
