//! Serve command handler

use metrics_exporter_prometheus::PrometheusHandle;
use tokio::signal;
use tracing::{error, info, warn};

use crate::api;
use crate::config::Config;

pub async fn cmd_serve(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<()> {
    info!("Shotify v{} starting...", env!("CARGO_PKG_VERSION"));

    if config.uses_default_jwt_secret() {
        warn!(
            "auth.jwt_secret is the built-in default; set JWT_SECRET before exposing this server"
        );
    }

    let port = config.server.port;
    let seed = config.general.seed_templates;
    let state = api::create_app_state_from_config(config, prometheus_handle).await?;

    if seed {
        // A failed seed leaves an empty catalog but the API still serves projects.
        match state.template_service().seed().await {
            Ok(0) => {}
            Ok(n) => info!(inserted = n, "Seeded template catalog"),
            Err(e) => warn!(error = %e, "Failed to seed templates"),
        }
    }

    let app = api::router(state);
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("🌐 API server running at http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => error!("Error listening for shutdown: {}", e),
    }
}
