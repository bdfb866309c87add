use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::HeaderValue,
    middleware,
    routing::{delete, get, post, put},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::db::Store;
use crate::services::{
    AuthService, DefaultUploadService, HttpProxyService, ProjectService, ProxyService,
    SeaOrmAuthService, SeaOrmProjectService, SeaOrmTemplateService, TemplateService,
    UploadService,
};
use crate::storage::{ObjectStore, S3LikeStore};

pub mod auth;
mod error;
mod observability;
mod projects;
mod proxy;
mod templates;
mod types;
mod uploads;

pub use auth::AuthUser;
pub use error::ApiError;
pub use types::*;

/// Multipart framing allowance on top of the configured upload size.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct AppState {
    pub config: Config,

    pub store: Store,

    auth_service: Arc<dyn AuthService>,

    template_service: Arc<dyn TemplateService>,

    project_service: Arc<dyn ProjectService>,

    upload_service: Arc<dyn UploadService>,

    proxy_service: Arc<dyn ProxyService>,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub const fn store(&self) -> &Store {
        &self.store
    }

    #[must_use]
    pub fn auth_service(&self) -> &dyn AuthService {
        self.auth_service.as_ref()
    }

    #[must_use]
    pub fn template_service(&self) -> &dyn TemplateService {
        self.template_service.as_ref()
    }

    #[must_use]
    pub fn project_service(&self) -> &dyn ProjectService {
        self.project_service.as_ref()
    }

    #[must_use]
    pub fn upload_service(&self) -> &dyn UploadService {
        self.upload_service.as_ref()
    }

    #[must_use]
    pub fn proxy_service(&self) -> &dyn ProxyService {
        self.proxy_service.as_ref()
    }
}

/// Wires the services over an existing store and object store.
pub fn create_app_state(
    config: Config,
    store: Store,
    object_store: Arc<dyn ObjectStore>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let auth_service = Arc::new(SeaOrmAuthService::new(
        store.clone(),
        &config.auth,
        config.security.clone(),
    ));
    let template_service = Arc::new(SeaOrmTemplateService::new(store.clone()));
    let project_service = Arc::new(SeaOrmProjectService::new(store.clone()));
    let upload_service = Arc::new(DefaultUploadService::new(
        object_store,
        config.uploads.clone(),
    ));
    let proxy_service = Arc::new(
        HttpProxyService::new(&config.proxy)
            .map_err(|e| anyhow::anyhow!("Failed to build proxy client: {e}"))?,
    );

    Ok(Arc::new(AppState {
        config,
        store,
        auth_service,
        template_service,
        project_service,
        upload_service,
        proxy_service,
        prometheus_handle,
    }))
}

/// Connects the database and the S3-compatible store described by `config`.
pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let store = Store::with_pool_options(
        &config.general.database_path,
        config.general.max_db_connections,
        config.general.min_db_connections,
    )
    .await?;

    let object_store: Arc<dyn ObjectStore> = Arc::new(
        S3LikeStore::new(config.storage.clone())
            .map_err(|e| anyhow::anyhow!("Failed to build object store client: {e}"))?,
    );

    create_app_state(config, store, object_store, prometheus_handle)
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors_origins = state.config.server.cors_allowed_origins.clone();
    let upload_limit = usize::try_from(state.config.uploads.max_bytes)
        .unwrap_or(usize::MAX)
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    let protected_routes = create_protected_router(state.clone(), upload_limit);

    let api_router = Router::new()
        .merge(protected_routes)
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/get-templates", get(templates::list_templates))
        .route("/get-template-byId/{id}", get(templates::get_template))
        .route("/proxy-image", get(proxy::proxy_image))
        .route("/metrics", get(observability::get_metrics))
        .fallback(observability::route_not_found)
        .layer(middleware::from_fn(observability::logging_middleware))
        .with_state(state.clone());

    let cors_layer = if cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> =
            cors_origins.iter().filter_map(|s| s.parse().ok()).collect();
        CorsLayer::new().allow_origin(origins)
    };

    Router::new()
        .route("/health", get(observability::health))
        .with_state(state)
        .nest("/api", api_router)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
}

fn create_protected_router(state: Arc<AppState>, upload_limit: usize) -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/me", get(auth::me))
        .route("/create-project", post(projects::create_project))
        .route("/get-projects", get(projects::list_projects))
        .route("/get-project-byId/{id}", get(projects::get_project))
        .route("/update-project/{id}", put(projects::update_project))
        .route("/delete-projects/{id}", delete(projects::delete_project))
        .route(
            "/uploads/image",
            post(uploads::upload_image)
                .delete(uploads::delete_image)
                .layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route_layer(middleware::from_fn_with_state(state, auth::auth_middleware))
}
