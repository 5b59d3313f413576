//! Domain error types
//!
//! This module defines the error hierarchy for Caspian. All errors are
//! domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Caspian error type
///
/// This is the primary error type used throughout the application.
/// It wraps specific error types and provides context for error handling.
#[derive(Debug, Error)]
pub enum CaspianError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Object storage errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Object-storage-specific errors
///
/// Failures surfaced by the underlying object storage provider. The provider
/// SDK's error types are reduced to strings so callers never depend on them.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to upload an object
    #[error("Failed to upload object: {0}")]
    Upload(String),

    /// Failed to download an object
    #[error("Failed to download object: {0}")]
    Download(String),

    /// Failed to copy an object server-side
    #[error("Failed to copy object: {0}")]
    Copy(String),

    /// Failed to delete an object
    #[error("Failed to delete object: {0}")]
    Delete(String),

    /// Failed to list objects
    #[error("Failed to list objects: {0}")]
    List(String),

    /// The requested object does not exist
    #[error("Object not found: {bucket}/{key}")]
    ObjectNotFound { bucket: String, key: String },
}

/// Database-specific errors
///
/// Errors that occur when interacting with PostgreSQL. Pool and driver
/// errors are reduced to strings.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to build a connection pool
    #[error("Failed to create connection pool: {0}")]
    Pool(String),

    /// Failed to get a connection from a pool
    #[error("Failed to get connection from pool: {0}")]
    Connection(String),

    /// Failed to begin a transaction
    #[error("Failed to begin transaction: {0}")]
    Begin(String),

    /// Failed to commit a transaction
    #[error("Failed to commit transaction: {0}")]
    Commit(String),

    /// Failed to roll back a transaction
    #[error("Failed to roll back transaction: {0}")]
    Rollback(String),

    /// A statement failed inside a session
    #[error("Query failed: {0}")]
    Query(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for CaspianError {
    fn from(err: std::io::Error) -> Self {
        CaspianError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for CaspianError {
    fn from(err: serde_json::Error) -> Self {
        CaspianError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for CaspianError {
    fn from(err: toml::de::Error) -> Self {
        CaspianError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Driver errors surface as query failures unless a more specific variant
// is chosen at the call site.
impl From<tokio_postgres::Error> for CaspianError {
    fn from(err: tokio_postgres::Error) -> Self {
        CaspianError::Database(DatabaseError::Query(err.to_string()))
    }
}
