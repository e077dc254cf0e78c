use anyhow::{Context, Result};
use axum::Router;
use tracing::info;

use crate::config::settings::SettingsConfig;
use crate::observability::metrics::{get_metrics, Metrics};
use crate::observability::routes::MetricsState;
use crate::server::handler::IssuerState;

#[derive(Clone)]
pub struct AppState {
    pub metrics_state: MetricsState,
    pub issuer_state: IssuerState,
}

impl AppState {
    pub fn new(metrics: &Metrics, issuer_state: IssuerState) -> Self {
        Self {
            metrics_state: MetricsState::new(metrics.registry.clone()),
            issuer_state,
        }
    }
}

pub fn build_router(settings_config: &SettingsConfig, state: AppState) -> Router {
    Router::new()
        .merge(state.metrics_state.router(&settings_config.metrics))
        .merge(state.issuer_state.router(&settings_config.invocation))
        .with_state(state)
}

/// Start one Axum server for the invocation path and, when enabled, metrics.
pub async fn start(settings_config: &SettingsConfig, issuer_state: IssuerState) -> Result<()> {
    let metrics = get_metrics().await;
    let state = AppState::new(metrics, issuer_state);
    let app = build_router(settings_config, state);

    let bind_addr = format!("{}:{}", settings_config.server.host, settings_config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("binding {}", bind_addr))?;
    info!("listening on {}", bind_addr);

    metrics.up.set(1);
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    metrics.up.set(0);
    served.context("http server failed")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("cannot listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("shutdown signal received");
}
