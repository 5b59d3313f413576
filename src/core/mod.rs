//! Business logic
//!
//! The workflows the CLI drives: archiving with catalog bookkeeping,
//! checksum-verified restores, and stale-archive cleanup.

pub mod archive;
pub mod checksum;
pub mod cleanup;

pub use archive::Archiver;
pub use cleanup::{CleanupRunner, CleanupSummary};
