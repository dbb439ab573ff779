//! Arctic Network backend.
//!
//! - Random-walk telemetry ticker mirrored into SQLite
//! - Dashboard, chat log, and assistant endpoints under `/api`
//! - Prometheus text at `/metrics`

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

use arctic_core::error::{ArcticError, Result};
use arctic_gateway::{app_state::AppState, config, router, storage::Database};

#[tokio::main]
async fn main() -> ExitCode {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "arctic-gateway failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let cfg = config::load()?;
    let listen = cfg.server.listen_addr()?;
    let period = Duration::from_millis(cfg.telemetry.tick_interval_ms);

    let db = Arc::new(Database::open(Path::new(&cfg.storage.path))?);
    tracing::info!(path = %cfg.storage.path, "database opened");

    let (state, ticker) = AppState::new(cfg, db)?;
    let _ = ticker.mirror_current();
    let ticker_task = tokio::spawn(ticker.run(period));

    let app = router::build_router(state);

    tracing::info!(%listen, "arctic-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| ArcticError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ArcticError::Internal(format!("server failed: {e}")))?;

    ticker_task.abort();
    tracing::info!("arctic-gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "SIGTERM handler unavailable");
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
    tracing::info!("shutting down");
}
