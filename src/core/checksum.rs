//! Checksum calculation for archive verification
//!
//! Archived files are fingerprinted with SHA-256 before upload; restores
//! recompute the digest and compare it against the catalog.

use crate::domain::{CaspianError, Result};
use sha2::{Digest, Sha256};
use std::path::Path;
use tokio::io::AsyncReadExt;

const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Calculate the SHA-256 checksum of a file, streaming its contents
///
/// # Arguments
///
/// * `path` - File to fingerprint
///
/// # Returns
///
/// Returns a hex-encoded SHA-256 checksum string (64 characters).
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened or read.
pub async fn file_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path).await.map_err(|err| {
        CaspianError::Io(format!("Failed to open {}: {err}", path.display()))
    })?;

    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; READ_BUFFER_SIZE];
    loop {
        let read = file.read(&mut buffer).await.map_err(|err| {
            CaspianError::Io(format!("Failed to read {}: {err}", path.display()))
        })?;
        if read == 0 {
            break;
        }
        hasher.update(&buffer[..read]);
    }

    let digest = hasher.finalize();
    Ok(format!("{digest:x}"))
}

/// Calculate the SHA-256 checksum of raw bytes
pub fn bytes_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}
