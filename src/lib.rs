// Caspian - Data Lake Archival Tool
// Copyright (c) 2026 Caspian Contributors
// Licensed under the MIT License

//! # Caspian - Data Lake Archival Tool
//!
//! Caspian archives local files into cloud object storage and tracks them
//! in a PostgreSQL catalog.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Storing** objects through a provider-dispatching facade
//!   ([`storage::CloudManager`]) over AWS S3
//! - **Tracking** archived files in a relational catalog with transactional
//!   sessions ([`database::Database`])
//! - **Verifying** restores against SHA-256 checksums recorded at archive
//!   time
//!
//! ## Architecture
//!
//! Caspian follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (archive, restore, cleanup, checksums)
//! - [`storage`] - Object storage facade and the AWS S3 backend
//! - [`database`] - Connection pools, sessions, and catalog queries
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use caspian::config::load_config;
//! use caspian::core::Archiver;
//! use caspian::database::Database;
//! use caspian::domain::ObjectLocation;
//! use caspian::storage::CloudManager;
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("caspian.toml")?;
//!
//!     let storage = Arc::new(CloudManager::new(
//!         config.storage.cloud_provider()?,
//!         config.storage.provider_config(),
//!     ));
//!     let database = Arc::new(Database::new(&config.database)?);
//!
//!     let archiver = Archiver::new(storage, database);
//!     let location = ObjectLocation::new("my-archive", "2026/report.csv")?;
//!     let record = archiver.archive_file(Path::new("report.csv"), &location).await?;
//!
//!     println!("Archived {} bytes", record.size_bytes);
//!     Ok(())
//! }
//! ```
//!
//! ## Sessions
//!
//! Database work runs in transactional sessions that commit on success and
//! roll back on error:
//!
//! ```rust,no_run
//! # use caspian::database::Database;
//! # async fn example(db: &Database) -> caspian::domain::Result<()> {
//! let session = db.session(false).await?;
//! session
//!     .execute("UPDATE files SET local_path = $1 WHERE id = $2", &[&"new_path.txt", &1i64])
//!     .await?;
//! session.commit().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Caspian uses the [`domain::CaspianError`] type for all errors:
//!
//! ```rust,no_run
//! use caspian::domain::CaspianError;
//!
//! fn example() -> Result<(), CaspianError> {
//!     let config = caspian::config::load_config("caspian.toml")?;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod database;
pub mod domain;
pub mod logging;
pub mod storage;
