//! Domain service for the read-only template catalog.

use thiserror::Error;

use crate::models::Template;

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Invalid template ID: {0}")]
    InvalidId(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for TemplateError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for TemplateError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait TemplateService: Send + Sync {
    /// All templates in storage order. An empty or absent platform applies no
    /// filter; otherwise the match is exact.
    async fn find_all(&self, platform: Option<&str>) -> Result<Vec<Template>, TemplateError>;

    /// `Ok(None)` when the id is well-formed but unknown.
    async fn find_by_id(&self, id: &str) -> Result<Option<Template>, TemplateError>;

    /// Inserts the built-in catalog when the store is empty. Returns the
    /// number of templates inserted.
    async fn seed(&self) -> Result<usize, TemplateError>;
}
