use axum::{
    body::Body,
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use super::{ApiError, AppState, UrlQuery};
use crate::services::ProxyError;

const CACHE_CONTROL: &str = "public, max-age=86400";

impl From<ProxyError> for ApiError {
    fn from(err: ProxyError) -> Self {
        match err {
            ProxyError::MissingUrl | ProxyError::InvalidUrl(_) | ProxyError::HostNotAllowed(_) => {
                Self::validation(err.to_string())
            }
            ProxyError::UpstreamStatus(_) | ProxyError::Upstream(_) => {
                Self::upstream("Image host", err.to_string())
            }
        }
    }
}

/// GET /proxy-image?url=
///
/// Public. Streams the upstream body through without buffering it.
pub async fn proxy_image(
    State(state): State<Arc<AppState>>,
    query: Result<Query<UrlQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query?;
    let raw = query.url.ok_or(ProxyError::MissingUrl)?;
    let image = state.proxy_service().fetch(&raw).await?;

    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream"));
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static(CACHE_CONTROL)),
        ],
        Body::from_stream(image.into_stream()),
    )
        .into_response())
}
