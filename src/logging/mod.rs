//! Logging and observability
//!
//! Structured logging with configurable levels, console output and optional
//! JSON file logging with rotation.
//!
//! # Example
//!
//! ```no_run
//! use caspian::logging::init_logging;
//! use caspian::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, LoggingGuard};

/// Log the start of an archive operation
#[macro_export]
macro_rules! log_archive_start {
    ($path:expr, $location:expr) => {
        tracing::info!(
            path = %$path.display(),
            location = %$location,
            "Archiving file"
        );
    };
}

/// Log the completion of an archive operation
#[macro_export]
macro_rules! log_archive_complete {
    ($location:expr, $bytes:expr) => {
        tracing::info!(
            location = %$location,
            bytes = $bytes,
            "Archive complete"
        );
    };
}

/// Log an error with context
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
