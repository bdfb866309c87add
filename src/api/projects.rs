//! Project endpoints. All of them require an authenticated caller and act
//! only on that caller's projects.

use axum::{
    Json,
    extract::{
        Path, State,
        rejection::{JsonRejection, PathRejection},
    },
    http::StatusCode,
};
use std::sync::Arc;

use super::auth::AuthUser;
use super::{ApiError, ApiResponse, AppState, CreateProjectRequest};
use crate::models::{Project, ProjectPatch};
use crate::services::{ProjectError, ProjectView};

impl From<ProjectError> for ApiError {
    fn from(err: ProjectError) -> Self {
        match err {
            ProjectError::InvalidId { .. } => Self::validation(err.to_string()),
            ProjectError::Validation(msg) => Self::validation(msg),
            ProjectError::TemplateNotFound | ProjectError::NotFound => {
                Self::NotFound(err.to_string())
            }
            ProjectError::Database(msg) => Self::DatabaseError(msg),
            ProjectError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// POST /create-project
pub async fn create_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    payload: Result<Json<CreateProjectRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ProjectView>>), ApiError> {
    let Json(payload) = payload?;
    let project = state
        .project_service()
        .create(&user_id, &payload.template_id, &payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Project created successfully", project)),
    ))
}

/// GET /get-projects
pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ApiResponse<Vec<Project>>>, ApiError> {
    let projects = state.project_service().list(&user_id).await?;
    Ok(Json(ApiResponse::success(
        "Projects retrieved successfully",
        projects,
    )))
}

/// GET /get-project-byId/{id}
pub async fn get_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<ProjectView>>, ApiError> {
    let Path(id) = path?;
    let project = state.project_service().get(&id, &user_id).await?;
    Ok(Json(ApiResponse::success(
        "Project retrieved successfully",
        project,
    )))
}

/// PUT /update-project/{id}
pub async fn update_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<String>, PathRejection>,
    patch: Result<Json<ProjectPatch>, JsonRejection>,
) -> Result<Json<ApiResponse<Project>>, ApiError> {
    let Path(id) = path?;
    let Json(patch) = patch?;
    let project = state.project_service().update(&id, &user_id, patch).await?;
    Ok(Json(ApiResponse::success(
        "Project updated successfully",
        project,
    )))
}

/// DELETE /delete-projects/{id}
pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Path(id) = path?;
    state.project_service().delete(&id, &user_id).await?;
    Ok(Json(ApiResponse::success("Project deleted successfully", ())))
}
