//! Object store factory
//!
//! Creates the concrete [`ObjectStore`] for a provider tag. Unknown
//! provider names never reach this point: [`CloudProvider`] parsing rejects
//! them with a configuration error, so the match here is exhaustive.

use crate::storage::aws::AwsObjectStore;
use crate::storage::traits::ObjectStore;
use crate::storage::{CloudProvider, ProviderConfig};
use std::sync::Arc;

/// Create an object store for the given provider
///
/// # Arguments
///
/// * `provider` - Which provider implementation to construct
/// * `config` - Provider configuration, cloned into the store
pub fn create_object_store(
    provider: CloudProvider,
    config: &ProviderConfig,
) -> Arc<dyn ObjectStore> {
    match provider {
        CloudProvider::Aws => {
            tracing::info!(region = %config.region, "Creating AWS S3 object store");
            Arc::new(AwsObjectStore::new(config.clone()))
        }
    }
}
