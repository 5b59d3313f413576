//! AWS S3 storage backend

pub mod adapter;
pub mod client;

pub use adapter::AwsObjectStore;
pub use client::S3Client;
