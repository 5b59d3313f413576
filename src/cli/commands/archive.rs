//! Archive command implementation
//!
//! This module implements the `archive` command: upload a local file to
//! object storage and record it in the catalog.

use crate::config::load_config;
use crate::core::Archiver;
use crate::database::Database;
use crate::domain::ObjectLocation;
use crate::storage::CloudManager;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

/// Arguments for the archive command
#[derive(Args, Debug)]
pub struct ArchiveArgs {
    /// Local file to archive
    #[arg(short, long)]
    pub file: PathBuf,

    /// Destination bucket (defaults to storage.bucket from the config)
    #[arg(long)]
    pub bucket: Option<String>,

    /// Destination object key (defaults to the file name under
    /// storage.key_prefix)
    #[arg(long)]
    pub key: Option<String>,
}

impl ArchiveArgs {
    /// Execute the archive command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file.display(), "Starting archive command");

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
        database.ensure_schema().await?;

        let location = self.location(&config)?;
        let archiver = Archiver::new(storage, database);

        match archiver.archive_file(&self.file, &location).await {
            Ok(record) => {
                println!("✅ Archived {} to {}", self.file.display(), location);
                println!("   {} bytes, sha256 {}", record.size_bytes, record.checksum);
                Ok(0)
            }
            Err(e) => {
                tracing::error!(error = %e, "Archive failed");
                println!("❌ Archive failed");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn location(&self, config: &crate::config::CaspianConfig) -> anyhow::Result<ObjectLocation> {
        let bucket = self
            .bucket
            .clone()
            .unwrap_or_else(|| config.storage.bucket.clone());
        let key = match &self.key {
            Some(key) => key.clone(),
            None => {
                let file_name = self
                    .file
                    .file_name()
                    .and_then(|name| name.to_str())
                    .ok_or_else(|| {
                        anyhow::anyhow!("Cannot derive object key from {}", self.file.display())
                    })?;
                format!("{}{}", config.storage.key_prefix, file_name)
            }
        };
        Ok(ObjectLocation::new(bucket, key)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        ApplicationConfig, CaspianConfig, DatabaseConfig, LoggingConfig, StorageConfig,
    };

    fn config_with_prefix(prefix: &str) -> CaspianConfig {
        CaspianConfig {
            application: ApplicationConfig::default(),
            storage: StorageConfig {
                provider: "aws".to_string(),
                region: "us-east-1".to_string(),
                access_key_id: None,
                secret_access_key: None,
                session_token: None,
                profile_name: None,
                bucket: "default-bucket".to_string(),
                key_prefix: prefix.to_string(),
            },
            database: DatabaseConfig {
                write_url: crate::config::secret_string("postgres://c@localhost/c"),
                readonly_url: None,
                max_connections: 4,
                connection_timeout_seconds: 5,
            },
            logging: LoggingConfig::default(),
        }
    }

    #[test]
    fn test_location_defaults_to_config_bucket_and_file_name() {
        let args = ArchiveArgs {
            file: PathBuf::from("/tmp/report.csv"),
            bucket: None,
            key: None,
        };
        let location = args.location(&config_with_prefix("2026/")).unwrap();
        assert_eq!(location.bucket, "default-bucket");
        assert_eq!(location.key, "2026/report.csv");
    }

    #[test]
    fn test_location_explicit_overrides() {
        let args = ArchiveArgs {
            file: PathBuf::from("/tmp/report.csv"),
            bucket: Some("other".to_string()),
            key: Some("custom/key.csv".to_string()),
        };
        let location = args.location(&config_with_prefix("")).unwrap();
        assert_eq!(location.bucket, "other");
        assert_eq!(location.key, "custom/key.csv");
    }
}
