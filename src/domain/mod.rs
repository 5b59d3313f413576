//! Domain models and types for Caspian.
//!
//! The domain layer provides:
//! - **Value types** ([`ObjectLocation`], [`ArchiveRecord`])
//! - **Error types** ([`CaspianError`], [`StorageError`], [`DatabaseError`])
//! - **Result type alias** ([`Result`])
//!
//! All fallible operations return [`Result<T>`]; errors convert into
//! [`CaspianError`] with the `?` operator.

pub mod errors;
pub mod location;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::{CaspianError, DatabaseError, StorageError};
pub use location::ObjectLocation;
pub use record::{ArchiveRecord, NewArchiveRecord};
pub use result::Result;
