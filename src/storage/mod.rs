//! Cloud object storage
//!
//! This module provides the provider-dispatching storage layer:
//!
//! - [`ObjectStore`] - the interface every provider implements
//! - [`CloudManager`] - provider-dispatching facade over a lazily-built store
//! - [`aws`] - the AWS S3 implementation
//!
//! Providers are selected by a [`CloudProvider`] tag parsed from
//! configuration; unknown provider names are rejected at parse time so no
//! operation can ever reach an unconstructed client.

pub mod aws;
pub mod factory;
pub mod manager;
pub mod traits;

use crate::config::SecretString;
use crate::domain::{CaspianError, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// Re-export commonly used types
pub use manager::CloudManager;
pub use traits::{KeyStream, ObjectStore};

/// Region used when the configuration does not name one
pub const DEFAULT_REGION: &str = "us-east-1";

/// Supported cloud providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// Amazon Web Services (S3)
    Aws,
}

impl CloudProvider {
    /// Names accepted by [`CloudProvider::from_str`]
    pub fn valid_names() -> &'static [&'static str] {
        &["aws"]
    }
}

impl FromStr for CloudProvider {
    type Err = CaspianError;

    /// Parse a provider name, case-insensitively
    ///
    /// # Errors
    ///
    /// Returns a configuration error naming the valid providers when the
    /// name is not recognized.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "aws" => Ok(CloudProvider::Aws),
            other => Err(CaspianError::Configuration(format!(
                "Invalid cloud provider '{}'. Valid providers: {}",
                other,
                Self::valid_names().join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CloudProvider::Aws => write!(f, "aws"),
        }
    }
}

/// Configuration bag passed to a provider's client constructor
///
/// Immutable once constructed. Credential material is secrecy-wrapped; the
/// concrete store only exposes it when the vendor client is built, which
/// happens on first use rather than at construction.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Provider region
    pub region: String,

    /// Static access key id (paired with `secret_access_key`)
    pub access_key_id: Option<String>,

    /// Static secret access key
    pub secret_access_key: Option<SecretString>,

    /// Session token for temporary credentials
    pub session_token: Option<SecretString>,

    /// Named credentials profile
    pub profile_name: Option<String>,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            profile_name: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("aws"; "lowercase")]
    #[test_case("AWS"; "uppercase")]
    #[test_case("Aws"; "mixed case")]
    fn test_provider_parse_accepts(name: &str) {
        assert_eq!(name.parse::<CloudProvider>().unwrap(), CloudProvider::Aws);
    }

    #[test]
    fn test_provider_parse_rejects_unknown() {
        let err = "azure".parse::<CloudProvider>().unwrap_err();
        assert!(matches!(err, CaspianError::Configuration(_)));
        assert!(err.to_string().contains("Valid providers: aws"));
    }

    #[test]
    fn test_provider_display_round_trips() {
        let provider = CloudProvider::Aws;
        assert_eq!(provider.to_string().parse::<CloudProvider>().unwrap(), provider);
    }

    #[test]
    fn test_provider_config_default_region() {
        let config = ProviderConfig::default();
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.access_key_id.is_none());
        assert!(config.profile_name.is_none());
    }

    #[test]
    fn test_provider_config_debug_redacts_secret() {
        let config = ProviderConfig {
            access_key_id: Some("AKIA123".to_string()),
            secret_access_key: Some(crate::config::secret_string("topsecret")),
            ..ProviderConfig::default()
        };
        let formatted = format!("{config:?}");
        assert!(!formatted.contains("topsecret"));
    }
}
