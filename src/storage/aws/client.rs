//! AWS S3 client wrapper
//!
//! Wraps the `aws-sdk-s3` client behind a lazy one-time initialization: the
//! SDK client is built on the first operation, not when the wrapper is
//! constructed, and credential/profile resolution happens at that point.

use crate::domain::{CaspianError, Result, StorageError};
use crate::storage::traits::KeyStream;
use crate::storage::ProviderConfig;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::config::Credentials;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use futures::stream::{self, StreamExt};
use secrecy::ExposeSecret;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::sync::OnceCell;

/// S3 client for Caspian
///
/// Holds the provider configuration and the lazily-built SDK client.
/// The wrapper is cheap to construct and performs no network activity
/// until the first operation.
pub struct S3Client {
    config: ProviderConfig,
    client: OnceCell<Client>,
}

impl S3Client {
    /// Create a new S3 client wrapper
    ///
    /// No credentials are read and no client is built here; both happen on
    /// first use.
    pub fn new(config: ProviderConfig) -> Self {
        Self {
            config,
            client: OnceCell::new(),
        }
    }

    /// The SDK client, built exactly once on first access
    ///
    /// Concurrent first calls race on the cell, not on construction: only
    /// one client is ever built.
    async fn client(&self) -> &Client {
        self.client
            .get_or_init(|| build_client(&self.config))
            .await
    }

    /// Upload a local file to (bucket, key)
    pub async fn upload(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()> {
        let body = ByteStream::from_path(file_path).await.map_err(|err| {
            CaspianError::Io(format!(
                "Failed to read {}: {err}",
                file_path.display()
            ))
        })?;

        self.client()
            .await
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body)
            .send()
            .await
            .map_err(|err| {
                StorageError::Upload(format!(
                    "{bucket}/{key}: {}",
                    DisplayErrorContext(&err)
                ))
            })?;

        tracing::debug!(bucket, key, "Uploaded object");
        Ok(())
    }

    /// Download (bucket, key) into a local file, streaming the body
    pub async fn download(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()> {
        let output = self
            .client()
            .await
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                let not_found = err
                    .as_service_error()
                    .map(|service_err| service_err.is_no_such_key())
                    .unwrap_or(false);
                if not_found {
                    StorageError::ObjectNotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    StorageError::Download(format!(
                        "{bucket}/{key}: {}",
                        DisplayErrorContext(&err)
                    ))
                }
            })?;

        let mut file = tokio::fs::File::create(file_path).await.map_err(|err| {
            CaspianError::Io(format!(
                "Failed to create {}: {err}",
                file_path.display()
            ))
        })?;

        let mut body = output.body;
        while let Some(chunk) = body.try_next().await.map_err(|err| {
            StorageError::Download(format!("{bucket}/{key}: {err}"))
        })? {
            file.write_all(&chunk).await.map_err(|err| {
                CaspianError::Io(format!(
                    "Failed to write {}: {err}",
                    file_path.display()
                ))
            })?;
        }
        file.flush().await.map_err(|err| {
            CaspianError::Io(format!(
                "Failed to flush {}: {err}",
                file_path.display()
            ))
        })?;

        tracing::debug!(bucket, key, path = %file_path.display(), "Downloaded object");
        Ok(())
    }

    /// Server-side copy of (bucket, key) to (dest_bucket, dest_key)
    pub async fn copy(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        self.client()
            .await
            .copy_object()
            .bucket(dest_bucket)
            .key(dest_key)
            .copy_source(copy_source(bucket, key))
            .send()
            .await
            .map_err(|err| {
                StorageError::Copy(format!(
                    "{bucket}/{key} -> {dest_bucket}/{dest_key}: {}",
                    DisplayErrorContext(&err)
                ))
            })?;

        tracing::debug!(bucket, key, dest_bucket, dest_key, "Copied object");
        Ok(())
    }

    /// Delete (bucket, key)
    ///
    /// S3 treats deleting a missing key as success.
    pub async fn delete(&self, bucket: &str, key: &str) -> Result<()> {
        self.client()
            .await
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| {
                StorageError::Delete(format!(
                    "{bucket}/{key}: {}",
                    DisplayErrorContext(&err)
                ))
            })?;

        tracing::debug!(bucket, key, "Deleted object");
        Ok(())
    }

    /// Lazy stream of keys under a prefix
    ///
    /// Pages are fetched with continuation tokens as the stream is polled;
    /// a page failure ends the stream after yielding the error.
    pub async fn list(&self, bucket: &str, prefix: &str) -> Result<KeyStream> {
        let state = ListState {
            client: self.client().await.clone(),
            bucket: bucket.to_string(),
            prefix: prefix.to_string(),
            continuation_token: None,
            done: false,
        };

        let keys = stream::unfold(state, |mut state| async move {
            if state.done {
                return None;
            }

            let mut request = state
                .client
                .list_objects_v2()
                .bucket(&state.bucket)
                .prefix(&state.prefix);
            if let Some(token) = state.continuation_token.take() {
                request = request.continuation_token(token);
            }

            match request.send().await {
                Ok(page) => {
                    if page.is_truncated() == Some(true) {
                        state.continuation_token =
                            page.next_continuation_token().map(str::to_string);
                    } else {
                        state.done = true;
                    }

                    let keys: Vec<Result<String>> = page
                        .contents
                        .unwrap_or_default()
                        .into_iter()
                        .filter_map(|object| object.key)
                        .map(Ok)
                        .collect();
                    Some((stream::iter(keys), state))
                }
                Err(err) => {
                    state.done = true;
                    let failure: crate::domain::CaspianError = StorageError::List(format!(
                        "{}/{}: {}",
                        state.bucket,
                        state.prefix,
                        DisplayErrorContext(&err)
                    ))
                    .into();
                    Some((stream::iter(vec![Err(failure)]), state))
                }
            }
        })
        .flatten()
        .boxed();

        Ok(keys)
    }
}

/// Listing cursor carried between pages
struct ListState {
    client: Client,
    bucket: String,
    prefix: String,
    continuation_token: Option<String>,
    done: bool,
}

/// Build the SDK client from the provider configuration
///
/// Explicit static credentials win over a named profile, which wins over
/// the ambient default provider chain.
async fn build_client(config: &ProviderConfig) -> Client {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(profile) = &config.profile_name {
        loader = loader.profile_name(profile);
    }

    if let (Some(access_key_id), Some(secret_access_key)) =
        (&config.access_key_id, &config.secret_access_key)
    {
        let credentials = Credentials::new(
            access_key_id,
            secret_access_key.expose_secret().as_ref(),
            config
                .session_token
                .as_ref()
                .map(|token| token.expose_secret().as_ref().to_string()),
            None,
            "caspian-config",
        );
        loader = loader.credentials_provider(credentials);
    }

    let sdk_config = loader.load().await;
    tracing::debug!(region = %config.region, "Built S3 client");
    Client::new(&sdk_config)
}

/// CopySource header value for a server-side copy
fn copy_source(bucket: &str, key: &str) -> String {
    format!("{bucket}/{key}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_source_format() {
        assert_eq!(copy_source("archive", "a/b.txt"), "archive/a/b.txt");
    }

    #[tokio::test]
    async fn test_client_is_not_built_at_construction() {
        let client = S3Client::new(ProviderConfig::default());
        assert!(client.client.get().is_none());
    }
}
