//! Configuration management for Caspian.
//!
//! Caspian loads a TOML configuration file with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Environment variable overrides (`CASPIAN_*` prefix, plus the legacy
//!   `CLOUD_PROVIDER` / `AWS_*` / `DATABASE_URL` names)
//! - Default values for optional settings
//! - Validation on load
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [storage]
//! provider = "aws"
//! region = "us-east-1"
//! bucket = "my-archive"
//! profile_name = "archiver"
//!
//! [database]
//! write_url = "${DATABASE_URL}"
//! readonly_url = "${READONLY_DATABASE_URL}"
//!
//! [logging]
//! local_enabled = false
//! ```
//!
//! Credentials and connection strings deserialize into
//! [`SecretString`] values: zeroized on drop, redacted in Debug output.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    ApplicationConfig, CaspianConfig, DatabaseConfig, LoggingConfig, StorageConfig,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
