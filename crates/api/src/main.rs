use std::sync::Arc;

use anyhow::Context;

use jobdesk_api::{app, middleware::AccessPolicy};
use jobdesk_infra::Settings;
use jobdesk_observability::TracingConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load settings")?;

    jobdesk_observability::init(&TracingConfig {
        default_filter: settings.logging.level.clone(),
        json: settings.logging.json,
    });

    let services = app::services::build_services(&settings.database).await?;
    let access = AccessPolicy::from_permit_all(settings.security.permit_all);
    if access == AccessPolicy::PermitAll {
        tracing::warn!("access control disabled; every API request is permitted");
    }

    let app = app::build_app(Arc::new(services), access);

    let addr = settings.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
}
