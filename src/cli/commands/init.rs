//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "caspian.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Caspian configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2); // Configuration error exit code
        }

        match fs::write(&self.output, Self::template()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your bucket and region", self.output);
                println!("  2. Export DATABASE_URL (and READONLY_DATABASE_URL for a replica)");
                println!("  3. Validate configuration: caspian validate-config");
                println!("  4. Archive a file: caspian archive --file <path>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5) // Fatal error exit code
            }
        }
    }

    fn template() -> &'static str {
        r#"# Caspian Configuration File
# Data lake archival tool

[application]
name = "caspian"
log_level = "info"

[storage]
# Provider selector; currently only "aws" is supported
provider = "aws"
region = "us-east-1"
bucket = "my-archive-bucket"
# Optional prefix prepended to default object keys
key_prefix = ""

# Credentials resolve in this order: static keys, named profile,
# then the ambient default provider chain.
# access_key_id = "${AWS_ACCESS_KEY_ID}"
# secret_access_key = "${AWS_SECRET_ACCESS_KEY}"
# session_token = "${AWS_SESSION_TOKEN}"
# profile_name = "archiver"

[database]
write_url = "${DATABASE_URL}"
# readonly_url = "${READONLY_DATABASE_URL}"
max_connections = 16
connection_timeout_seconds = 30

[logging]
local_enabled = false
local_path = "logs"
local_rotation = "daily"
"#
    }
}
