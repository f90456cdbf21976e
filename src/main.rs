//! GetProduct server binary.

use anyhow::Context;
use clap::Parser;
use getproduct::api::rest::{AppState, create_router};
use getproduct::bootstrap::build_engine;
use getproduct::config::{AppConfig, CONFIG_PATH_ENV};
use getproduct::telemetry::init_tracing;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};

/// Barcode product lookup service.
#[derive(Debug, Parser)]
#[command(name = "getproduct", version, about)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = CONFIG_PATH_ENV)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref()).context("failed to load configuration")?;

    init_tracing(&config.log)?;
    if config.debug {
        info!(?config, "debug mode enabled");
    }

    let engine = build_engine(&config).await?;
    let state = Arc::new(
        AppState::new(Arc::new(engine), config.version.clone())
            .with_request_timeout(config.server.request_timeout()),
    );
    let app = create_router(state);

    let address = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    info!(%address, version = %config.version, "starting getproduct server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {}", e);
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
                error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("shutdown signal received");
}
