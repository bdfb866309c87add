//! Domain service for instantiating and editing user projects.
//!
//! Every lookup, update and delete is scoped to the calling user. A project
//! owned by someone else is reported exactly like a missing one.

use serde::Serialize;
use thiserror::Error;

use crate::domain::UserId;
use crate::models::{Project, ProjectPatch, Template};

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Invalid {kind} ID: {value}")]
    InvalidId { kind: &'static str, value: String },

    #[error("{0}")]
    Validation(String),

    #[error("Template not found")]
    TemplateNotFound,

    #[error("Project not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ProjectError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ProjectError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<crate::domain::InvalidId> for ProjectError {
    fn from(err: crate::domain::InvalidId) -> Self {
        Self::InvalidId {
            kind: err.kind,
            value: err.value,
        }
    }
}

/// A project together with the template it was created from, when that
/// template still exists.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    #[serde(flatten)]
    pub project: Project,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<Template>,
}

#[async_trait::async_trait]
pub trait ProjectService: Send + Sync {
    /// Snapshots the template's configuration into a new project owned by
    /// `user_id`. Later edits to the template never reach the project.
    async fn create(
        &self,
        user_id: &UserId,
        template_id: &str,
        name: &str,
    ) -> Result<ProjectView, ProjectError>;

    /// Most recently updated first.
    async fn list(&self, user_id: &UserId) -> Result<Vec<Project>, ProjectError>;

    async fn get(&self, project_id: &str, user_id: &UserId) -> Result<ProjectView, ProjectError>;

    /// Applies a partial patch. Empty strings and absent fields are ignored;
    /// a present configuration replaces the stored one wholesale.
    async fn update(
        &self,
        project_id: &str,
        user_id: &UserId,
        patch: ProjectPatch,
    ) -> Result<Project, ProjectError>;

    /// Hard delete.
    async fn delete(&self, project_id: &str, user_id: &UserId) -> Result<(), ProjectError>;

    async fn count(&self, user_id: &UserId) -> Result<u64, ProjectError>;
}
