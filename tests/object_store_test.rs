//! Object store semantics tests
//!
//! Exercises the `ObjectStore` trait's provided `move_object` and
//! `transfer_object` methods against an in-memory implementation of the
//! required primitives, the same composition the AWS backend inherits.

use async_trait::async_trait;
use caspian::domain::{CaspianError, Result, StorageError};
use caspian::storage::{KeyStream, ObjectStore};
use futures::stream::{self, StreamExt};
use std::collections::HashMap;
use std::path::Path;
use tokio::sync::Mutex;

/// In-memory object store implementing only the required primitives, so
/// `move_object`/`transfer_object` run the real provided methods.
struct MemoryObjectStore {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
}

impl MemoryObjectStore {
    fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
        }
    }

    async fn contents(&self, bucket: &str, key: &str) -> Option<Vec<u8>> {
        self.objects
            .lock()
            .await
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    async fn upload_object(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()> {
        let bytes = tokio::fs::read(file_path)
            .await
            .map_err(|err| CaspianError::Io(err.to_string()))?;
        self.objects
            .lock()
            .await
            .insert((bucket.to_string(), key.to_string()), bytes);
        Ok(())
    }

    async fn download_object(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()> {
        let bytes = self.contents(bucket, key).await.ok_or_else(|| {
            StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            }
        })?;
        tokio::fs::write(file_path, bytes)
            .await
            .map_err(|err| CaspianError::Io(err.to_string()))?;
        Ok(())
    }

    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        let mut objects = self.objects.lock().await;
        let bytes = objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::ObjectNotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })?;
        objects.insert((dest_bucket.to_string(), dest_key.to_string()), bytes);
        Ok(())
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        // Deleting a missing key succeeds, matching S3.
        self.objects
            .lock()
            .await
            .remove(&(bucket.to_string(), key.to_string()));
        Ok(())
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<KeyStream> {
        let objects = self.objects.lock().await;
        let mut keys: Vec<String> = objects
            .keys()
            .filter(|(b, k)| b == bucket && k.starts_with(prefix))
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        Ok(stream::iter(keys.into_iter().map(Ok)).boxed())
    }
}

async fn store_with_object(bucket: &str, key: &str, contents: &[u8]) -> MemoryObjectStore {
    let store = MemoryObjectStore::new();
    store
        .objects
        .lock()
        .await
        .insert((bucket.to_string(), key.to_string()), contents.to_vec());
    store
}

async fn collect_keys(store: &MemoryObjectStore, bucket: &str, prefix: &str) -> Vec<String> {
    store
        .list_objects(bucket, prefix)
        .await
        .unwrap()
        .map(|key| key.unwrap())
        .collect()
        .await
}

#[tokio::test]
async fn test_upload_then_download_round_trips_bytes() {
    let store = MemoryObjectStore::new();
    let dir = tempfile::tempdir().unwrap();

    let original = dir.path().join("local.txt");
    tokio::fs::write(&original, b"Hello, world!").await.unwrap();

    store
        .upload_object(&original, "test-bucket", "a/b.txt")
        .await
        .unwrap();

    let restored = dir.path().join("restored.txt");
    store
        .download_object("test-bucket", "a/b.txt", &restored)
        .await
        .unwrap();

    assert_eq!(
        tokio::fs::read(&original).await.unwrap(),
        tokio::fs::read(&restored).await.unwrap()
    );
}

#[tokio::test]
async fn test_upload_then_list_contains_exactly_the_key() {
    let store = MemoryObjectStore::new();
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("local.txt");
    tokio::fs::write(&local, b"contents").await.unwrap();

    store
        .upload_object(&local, "test-bucket", "a/b.txt")
        .await
        .unwrap();

    assert_eq!(
        collect_keys(&store, "test-bucket", "a/").await,
        vec!["a/b.txt".to_string()]
    );
}

#[tokio::test]
async fn test_delete_then_list_excludes_key() {
    let store = store_with_object("test-bucket", "a/b.txt", b"contents").await;

    store.delete_object("test-bucket", "a/b.txt").await.unwrap();

    assert!(collect_keys(&store, "test-bucket", "a/b.txt").await.is_empty());
}

#[tokio::test]
async fn test_list_prefix_filters_other_keys() {
    let store = store_with_object("test-bucket", "a/one.txt", b"1").await;
    store
        .objects
        .lock()
        .await
        .extend([
            (("test-bucket".to_string(), "a/two.txt".to_string()), b"2".to_vec()),
            (("test-bucket".to_string(), "b/three.txt".to_string()), b"3".to_vec()),
            (("other-bucket".to_string(), "a/four.txt".to_string()), b"4".to_vec()),
        ]);

    assert_eq!(
        collect_keys(&store, "test-bucket", "a/").await,
        vec!["a/one.txt".to_string(), "a/two.txt".to_string()]
    );
}

#[tokio::test]
async fn test_transfer_with_delete_source_moves_object() {
    let store = store_with_object("b1", "k", b"payload").await;

    store.transfer_object("b1", "k", "b2", "k2", true).await.unwrap();

    assert_eq!(store.contents("b2", "k2").await.unwrap(), b"payload");
    assert!(store.contents("b1", "k").await.is_none());
}

#[tokio::test]
async fn test_transfer_without_delete_source_keeps_both() {
    let store = store_with_object("b1", "k", b"payload").await;

    store.transfer_object("b1", "k", "b2", "k2", false).await.unwrap();

    assert_eq!(store.contents("b2", "k2").await.unwrap(), b"payload");
    assert_eq!(store.contents("b1", "k").await.unwrap(), b"payload");
}

// A move is a same-bucket server-side copy. An implementation that fed its
// upload path the bucket name as a local file path could never produce the
// source bytes at the destination, which is exactly what this asserts.
#[tokio::test]
async fn test_move_preserves_source_content() {
    let store = store_with_object("test-bucket", "src.txt", b"the original bytes").await;

    store
        .move_object("test-bucket", "src.txt", "dst.txt", true)
        .await
        .unwrap();

    assert_eq!(
        store.contents("test-bucket", "dst.txt").await.unwrap(),
        b"the original bytes"
    );
    assert!(store.contents("test-bucket", "src.txt").await.is_none());
}

#[tokio::test]
async fn test_move_without_delete_source_keeps_source() {
    let store = store_with_object("test-bucket", "src.txt", b"payload").await;

    store
        .move_object("test-bucket", "src.txt", "dst.txt", false)
        .await
        .unwrap();

    assert_eq!(
        store.contents("test-bucket", "src.txt").await.unwrap(),
        b"payload"
    );
    assert_eq!(
        store.contents("test-bucket", "dst.txt").await.unwrap(),
        b"payload"
    );
}

#[tokio::test]
async fn test_move_missing_source_fails_without_side_effects() {
    let store = MemoryObjectStore::new();

    let err = store
        .move_object("test-bucket", "missing.txt", "dst.txt", true)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CaspianError::Storage(StorageError::ObjectNotFound { .. })
    ));
    assert!(store.contents("test-bucket", "dst.txt").await.is_none());
}

#[tokio::test]
async fn test_download_missing_object_is_not_found() {
    let store = MemoryObjectStore::new();
    let dir = tempfile::tempdir().unwrap();

    let err = store
        .download_object("test-bucket", "missing.txt", &dir.path().join("out.txt"))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        CaspianError::Storage(StorageError::ObjectNotFound { .. })
    ));
}
