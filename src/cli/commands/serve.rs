use anyhow::Context;
use tokio::signal;
use tracing::info;

use crate::app::{app, AppState};
use crate::config::AppConfig;

pub async fn handle(mut config: AppConfig, port: Option<u16>) -> anyhow::Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }
    info!("Starting Psychology Study API in {:?} mode", config.environment);

    let store = super::connect(&config).await?;
    let state = AppState::new(store.clone(), &config);
    state
        .catalogue
        .seed_if_empty()
        .await
        .context("failed to seed branch catalogue")?;

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;
    info!("Psychology Study API listening on http://{}", bind_addr);

    let served = axum::serve(listener, app(state, &config))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    store.close().await;
    info!("Server stopped");
    served.context("server error")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
