//! Status command implementation
//!
//! Displays catalog counters: how many files are archived, how much data
//! they hold, and when the catalog last changed.

use crate::config::load_config;
use crate::database::{catalog, Database};
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking archive status");

        println!("📊 Archive Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let database = match Database::new(&config.database) {
            Ok(db) => db,
            Err(e) => {
                println!("❌ Failed to set up database pools");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        // Prefer the replica for reporting when one is configured.
        let readonly = database.has_readonly();
        let stats = match database
            .with_session(readonly, |session| {
                Box::pin(async move { catalog::stats(session).await })
            })
            .await
        {
            Ok(stats) => stats,
            Err(e) => {
                println!("❌ Failed to query catalog");
                println!("   Error: {e}");
                return Ok(4); // Connection error exit code
            }
        };

        if stats.file_count == 0 {
            println!("No archived files found.");
            println!("Run 'caspian archive --file <path>' to archive a file.");
            return Ok(0);
        }

        println!("  Files archived: {}", stats.file_count);
        println!("  Total size: {} bytes", stats.total_bytes);
        if let Some(last_updated) = stats.last_updated {
            println!("  Last update: {last_updated}");
        }
        println!();
        Ok(0)
    }
}
