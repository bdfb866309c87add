use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::{ApiError, ApiResponse, AppState, PlatformQuery};
use crate::models::Template;
use crate::services::TemplateError;

impl From<TemplateError> for ApiError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::InvalidId(_) => Self::validation(err.to_string()),
            TemplateError::Database(msg) => Self::DatabaseError(msg),
            TemplateError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /get-templates?platform=
pub async fn list_templates(
    State(state): State<Arc<AppState>>,
    query: Result<Query<PlatformQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<Template>>>, ApiError> {
    let Query(query) = query?;
    let templates = state
        .template_service()
        .find_all(query.platform.as_deref())
        .await?;

    Ok(Json(ApiResponse::success(
        "Templates retrieved successfully",
        templates,
    )))
}

/// GET /get-template-byId/{id}
pub async fn get_template(
    State(state): State<Arc<AppState>>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ApiResponse<Template>>, ApiError> {
    let Path(id) = path?;
    let template = state
        .template_service()
        .find_by_id(&id)
        .await?
        .ok_or_else(|| ApiError::not_found("Template", &id))?;

    Ok(Json(ApiResponse::success(
        "Template retrieved successfully",
        template,
    )))
}
