pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession, UserProfile};
pub use auth_service_impl::{SeaOrmAuthService, TokenSigner};

pub mod template_service;
pub mod template_service_impl;
pub use template_service::{TemplateError, TemplateService};
pub use template_service_impl::SeaOrmTemplateService;

pub mod project_service;
pub mod project_service_impl;
pub use project_service::{ProjectError, ProjectService, ProjectView};
pub use project_service_impl::SeaOrmProjectService;

pub mod upload_service;
pub mod upload_service_impl;
pub use upload_service::{UploadError, UploadResult, UploadService};
pub use upload_service_impl::DefaultUploadService;

pub mod proxy_service;
pub mod proxy_service_impl;
pub use proxy_service::{ProxiedImage, ProxyError, ProxyService};
pub use proxy_service_impl::HttpProxyService;
