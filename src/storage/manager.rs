//! Provider-dispatching storage facade
//!
//! [`CloudManager`] owns a provider tag and its configuration, resolves the
//! concrete [`ObjectStore`] exactly once on first use, and forwards every
//! operation to it. Callers never see the concrete provider type.

use crate::domain::Result;
use crate::storage::factory::create_object_store;
use crate::storage::traits::{KeyStream, ObjectStore};
use crate::storage::{CloudProvider, ProviderConfig};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::OnceCell;

/// Facade over one provider's object storage
///
/// Constructed once per application; the underlying store is built on the
/// first operation and reused for the manager's lifetime. The one-time cell
/// makes concurrent first use construct exactly one store.
pub struct CloudManager {
    provider: CloudProvider,
    config: ProviderConfig,
    store: OnceCell<Arc<dyn ObjectStore>>,
}

impl CloudManager {
    /// Create a new cloud manager
    ///
    /// The configuration is not validated against the provider here; the
    /// store is constructed lazily on first use.
    pub fn new(provider: CloudProvider, config: ProviderConfig) -> Self {
        Self {
            provider,
            config,
            store: OnceCell::new(),
        }
    }

    /// The provider this manager dispatches to
    pub fn provider(&self) -> CloudProvider {
        self.provider
    }

    /// Resolve the concrete store, building it on first call
    async fn store(&self) -> &Arc<dyn ObjectStore> {
        self.store
            .get_or_init(|| async { create_object_store(self.provider, &self.config) })
            .await
    }

    #[cfg(test)]
    pub(crate) fn with_store(
        provider: CloudProvider,
        config: ProviderConfig,
        store: Arc<dyn ObjectStore>,
    ) -> Self {
        Self {
            provider,
            config,
            store: OnceCell::new_with(Some(store)),
        }
    }
}

#[async_trait]
impl ObjectStore for CloudManager {
    async fn upload_object(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()> {
        self.store().await.upload_object(file_path, bucket, key).await
    }

    async fn download_object(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()> {
        self.store().await.download_object(bucket, key, file_path).await
    }

    async fn copy_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        self.store()
            .await
            .copy_object(bucket, key, dest_bucket, dest_key)
            .await
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.store().await.delete_object(bucket, key).await
    }

    async fn list_objects(&self, bucket: &str, prefix: &str) -> Result<KeyStream> {
        self.store().await.list_objects(bucket, prefix).await
    }

    async fn move_object(
        &self,
        bucket: &str,
        key: &str,
        dest_key: &str,
        delete_source: bool,
    ) -> Result<()> {
        self.store()
            .await
            .move_object(bucket, key, dest_key, delete_source)
            .await
    }

    async fn transfer_object(
        &self,
        bucket: &str,
        key: &str,
        dest_bucket: &str,
        dest_key: &str,
        delete_source: bool,
    ) -> Result<()> {
        self.store()
            .await
            .transfer_object(bucket, key, dest_bucket, dest_key, delete_source)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::StorageError;
    use futures::stream::{self, StreamExt};
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    /// In-memory store used to observe what the facade forwards.
    struct MemoryStore {
        objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    }

    impl MemoryStore {
        fn new() -> Self {
            Self {
                objects: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl ObjectStore for MemoryStore {
        async fn upload_object(&self, file_path: &Path, bucket: &str, key: &str) -> Result<()> {
            let bytes = tokio::fs::read(file_path)
                .await
                .map_err(|err| crate::domain::CaspianError::Io(err.to_string()))?;
            self.objects
                .lock()
                .await
                .insert((bucket.to_string(), key.to_string()), bytes);
            Ok(())
        }

        async fn download_object(&self, bucket: &str, key: &str, file_path: &Path) -> Result<()> {
            let objects = self.objects.lock().await;
            let bytes = objects
                .get(&(bucket.to_string(), key.to_string()))
                .ok_or_else(|| StorageError::ObjectNotFound {
                    bucket: bucket.to_string(),
                    key: key.to_string(),
                })?;
            tokio::fs::write(file_path, bytes)
                .await
                .map_err(|err| crate::domain::CaspianError::Io(err.to_string()))?;
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

    fn manager_with_memory_store() -> CloudManager {
        CloudManager::with_store(
            CloudProvider::Aws,
            ProviderConfig::default(),
            Arc::new(MemoryStore::new()),
        )
    }

    #[tokio::test]
    async fn test_store_is_resolved_once() {
        let manager = CloudManager::new(CloudProvider::Aws, ProviderConfig::default());
        assert!(manager.store.get().is_none());

        let first = Arc::clone(manager.store().await);
        let second = Arc::clone(manager.store().await);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_manager_forwards_upload_and_list() {
        let manager = manager_with_memory_store();
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.txt");
        tokio::fs::write(&local, b"hello").await.unwrap();

        manager
            .upload_object(&local, "test-bucket", "a/b.txt")
            .await
            .unwrap();

        let keys: Vec<String> = manager
            .list_objects("test-bucket", "a/")
            .await
            .unwrap()
            .map(|key| key.unwrap())
            .collect()
            .await;
        assert_eq!(keys, vec!["a/b.txt".to_string()]);
    }

    #[tokio::test]
    async fn test_manager_move_preserves_content() {
        let manager = manager_with_memory_store();
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join("local.txt");
        tokio::fs::write(&local, b"payload").await.unwrap();

        manager
            .upload_object(&local, "test-bucket", "src.txt")
            .await
            .unwrap();
        manager
            .move_object("test-bucket", "src.txt", "dst.txt", true)
            .await
            .unwrap();

        let restored = dir.path().join("restored.txt");
        manager
            .download_object("test-bucket", "dst.txt", &restored)
            .await
            .unwrap();
        assert_eq!(tokio::fs::read(&restored).await.unwrap(), b"payload");

        let missing = manager
            .download_object("test-bucket", "src.txt", &restored)
            .await;
        assert!(missing.is_err());
    }
}
