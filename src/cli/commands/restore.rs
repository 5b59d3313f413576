//! Restore command implementation
//!
//! Downloads an archived object into a local file and verifies its
//! checksum against the catalog.

use crate::config::load_config;
use crate::core::Archiver;
use crate::database::Database;
use crate::domain::ObjectLocation;
use crate::storage::CloudManager;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the restore command
#[derive(Args, Debug)]
pub struct RestoreArgs {
    /// Bucket holding the object (defaults to storage.bucket from the config)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key of the object to restore
    #[arg(long)]
    pub key: String,

    /// Local path to write the file to
    #[arg(short, long)]
    pub output: PathBuf,
}

impl RestoreArgs {
    /// Execute the restore command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(key = %self.key, "Starting restore command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let provider = config.storage.cloud_provider()?;
        let storage = Arc::new(CloudManager::new(
            provider,
            config.storage.provider_config(),
        ));

        let database = match Database::new(&config.database) {
            Ok(db) => Arc::new(db),
            Err(e) => {
                println!("❌ Failed to set up database pools");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        let bucket = self
            .bucket
            .clone()
            .unwrap_or_else(|| config.storage.bucket.clone());
        let location = ObjectLocation::new(bucket, self.key.clone())?;
        let archiver = Archiver::new(storage, database);

        match archiver.restore_file(&location, &self.output).await {
            Ok(record) => {
                println!("✅ Restored {} to {}", location, self.output.display());
                println!("   {} bytes, checksum verified", record.size_bytes);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Restore failed");
                println!("❌ Restore failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
