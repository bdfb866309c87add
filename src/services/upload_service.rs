//! Domain service for user image uploads.
//!
//! Uploaded objects live under `uploads/<userID>/`. The prefix is the only
//! ownership record; no table tracks uploads.

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserId;

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "webp"];

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Image file is required")]
    MissingFile,

    #[error("Invalid file type: only PNG, JPG, JPEG, WebP allowed")]
    UnsupportedType,

    #[error("File too large: max {max_mb}MB allowed")]
    TooLarge { max_mb: u64 },

    #[error("Upload not found")]
    NotFound,

    #[error("Failed to store file: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<crate::storage::StorageError> for UploadError {
    fn from(err: crate::storage::StorageError) -> Self {
        Self::Storage(err.to_string())
    }
}

impl From<anyhow::Error> for UploadError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadResult {
    pub url: String,
    pub key: String,
    pub filename: String,
    pub size: u64,
}

#[async_trait::async_trait]
pub trait UploadService: Send + Sync {
    /// Largest accepted body in bytes.
    fn max_bytes(&self) -> u64;

    /// Rejects filenames whose extension is not an allowed image type.
    /// Returns the lower-cased extension.
    fn check_filename(&self, filename: &str) -> Result<String, UploadError>;

    /// Validates and stores an image under a fresh key in the user's prefix.
    async fn upload_image(
        &self,
        user_id: &UserId,
        filename: &str,
        body: Vec<u8>,
    ) -> Result<UploadResult, UploadError>;

    /// Deletes an object the user uploaded. Keys outside the user's prefix
    /// yield [`UploadError::NotFound`].
    async fn delete_image(&self, user_id: &UserId, key: &str) -> Result<(), UploadError>;
}
