//! Object storage for uploaded assets.
//!
//! The service layer only ever sees [`ObjectStore`]. Production deployments
//! use [`S3LikeStore`]; tests and local development use [`MemoryObjectStore`].

mod memory;
mod s3;

pub use memory::{MemoryObjectStore, StoredObject};
pub use s3::S3LikeStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("invalid object store configuration: {0}")]
    Config(String),

    #[error("object store {operation} {key} failed: {message}")]
    Request {
        operation: &'static str,
        key: String,
        message: String,
    },
}

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Writes `body` under `key`, replacing any existing object.
    async fn put(&self, key: &str, body: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Removes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), StorageError>;

    /// The URL a browser uses to fetch `key`.
    fn public_url(&self, key: &str) -> String;
}

/// Resolves the public URL of `key` for the given storage settings.
///
/// Precedence: an explicit `public_base_url`, then path-style addressing on a
/// custom endpoint, then the virtual-hosted AWS form.
#[must_use]
pub fn public_url(config: &StorageConfig, key: &str) -> String {
    let key = key.trim_start_matches('/');

    if let Some(base) = config.public_base_url.as_deref().filter(|b| !b.is_empty()) {
        return format!("{}/{}", base.trim_end_matches('/'), key);
    }

    if let Some(endpoint) = config.endpoint.as_deref().filter(|e| !e.is_empty()) {
        return format!("{}/{}/{}", endpoint.trim_end_matches('/'), config.bucket, key);
    }

    format!(
        "https://{}.s3.{}.amazonaws.com/{}",
        config.bucket, config.region, key
    )
}
