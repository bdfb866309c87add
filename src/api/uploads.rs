use axum::{
    Json,
    extract::{
        Multipart, Query, State, multipart::MultipartRejection, rejection::QueryRejection,
    },
};
use std::sync::Arc;
use tracing::debug;

use super::auth::AuthUser;
use super::{ApiError, ApiResponse, AppState, KeyQuery};
use crate::services::{UploadError, UploadResult};

const IMAGE_FIELD: &str = "image";

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::MissingFile
            | UploadError::UnsupportedType
            | UploadError::TooLarge { .. } => Self::validation(err.to_string()),
            UploadError::NotFound => Self::NotFound(err.to_string()),
            UploadError::Storage(msg) => Self::upstream("Object storage", msg),
            UploadError::Internal(msg) => Self::internal(msg),
        }
    }
}

fn malformed(err: impl std::fmt::Display) -> ApiError {
    debug!(error = %err, "Rejected multipart body");
    UploadError::MissingFile.into()
}

/// POST /uploads/image (multipart, field `image`)
///
/// The body is read chunk by chunk and reading stops one chunk past the
/// configured limit, so an oversized file is never buffered in full.
pub async fn upload_image(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ApiResponse<UploadResult>>, ApiError> {
    let mut multipart = multipart.map_err(malformed)?;
    let uploads = state.upload_service();
    let limit = usize::try_from(uploads.max_bytes()).unwrap_or(usize::MAX);

    while let Some(mut field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        uploads.check_filename(&filename)?;

        let mut body = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(malformed)? {
            body.extend_from_slice(&chunk);
            if body.len() > limit {
                break;
            }
        }

        let result = uploads.upload_image(&user_id, &filename, body).await?;
        return Ok(Json(ApiResponse::success(
            "Image uploaded successfully",
            result,
        )));
    }

    Err(UploadError::MissingFile.into())
}

/// DELETE /uploads/image?key=
pub async fn delete_image(
    State(state): State<Arc<AppState>>,
    AuthUser(user_id): AuthUser,
    query: Result<Query<KeyQuery>, QueryRejection>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let Query(query) = query?;
    let key = query
        .key
        .filter(|k| !k.trim().is_empty())
        .ok_or_else(|| ApiError::validation("Key parameter is required"))?;

    state.upload_service().delete_image(&user_id, &key).await?;
    Ok(Json(ApiResponse::success("Image deleted successfully", ())))
}
