//! Cleanup command implementation
//!
//! Deletes archived objects whose catalog rows are older than a cutoff,
//! along with the rows themselves.

use crate::config::load_config;
use crate::core::CleanupRunner;
use crate::database::Database;
use crate::storage::CloudManager;
use chrono::Duration;
use clap::Args;
use std::sync::Arc;

/// Arguments for the cleanup command
#[derive(Args, Debug)]
pub struct CleanupArgs {
    /// Bucket to clean (defaults to storage.bucket from the config)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Key prefix to clean under (defaults to storage.key_prefix)
    #[arg(long)]
    pub prefix: Option<String>,

    /// Delete objects not updated within this many days
    #[arg(long, default_value_t = 30)]
    pub older_than_days: i64,

    /// List what would be deleted without deleting anything
    #[arg(long)]
    pub dry_run: bool,
}

impl CleanupArgs {
    /// Execute the cleanup command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(older_than_days = self.older_than_days, "Starting cleanup command");

        if self.older_than_days <= 0 {
            println!("❌ --older-than-days must be positive");
            return Ok(2); // Configuration error exit code
        }

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
        let prefix = self
            .prefix
            .clone()
            .unwrap_or_else(|| config.storage.key_prefix.clone());

        let runner = CleanupRunner::new(storage, database);
        match runner
            .run(&bucket, &prefix, Duration::days(self.older_than_days), self.dry_run)
            .await
        {
            Ok(summary) => {
                if summary.dry_run {
                    println!(
                        "🔍 Dry run: {} stale object(s) under {}/{}",
                        summary.examined, bucket, prefix
                    );
                } else {
                    println!(
                        "✅ Cleanup removed {} object(s) and {} catalog row(s)",
                        summary.deleted_objects, summary.deleted_records
                    );
                }
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Cleanup failed");
                println!("❌ Cleanup failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }
}
