//! Relational database access
//!
//! A [`Database`] wraps a read-write pool and an optional read-only pool
//! and yields transactional [`Session`]s that commit on success and roll
//! back on error, with the connection released on every exit path.
//! [`catalog`] holds the queries over the `files` table.

pub mod catalog;
pub mod pool;
pub mod session;

pub use catalog::CatalogStats;
pub use pool::Database;
pub use session::Session;
