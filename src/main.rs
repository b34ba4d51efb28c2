use anyhow::{Context, Result};
use clap::Parser;
use playlist_service::{
    AppState, build_router,
    config::{AppConfig, Cli, StorageBackend},
};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env()
        .context("failed to load application configuration")?
        .with_cli(cli);

    init_tracing(&config.log_filter);

    let state = match config.storage {
        StorageBackend::Memory => {
            info!("storage backend: memory");
            AppState::in_memory()
        }
        StorageBackend::File => {
            info!(data_dir = %config.data_dir.display(), "storage backend: file");
            AppState::open_dir(&config.data_dir)
                .await
                .with_context(|| format!("failed to open data dir {}", config.data_dir.display()))?
        }
    };

    let app = build_router(state);

    let addr = config.address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(address = %addr, "playlist service started");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let signal = wait_for_shutdown().await;
            info!(signal, "shutting down");
        })
        .await
        .context("server error")?;

    Ok(())
}

/// `RUST_LOG` wins over the configured filter.
fn init_tracing(fallback: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Resolves with the name of the first termination signal received.
async fn wait_for_shutdown() -> &'static str {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut sigterm = match signal(SignalKind::terminate()) {
            Ok(stream) => stream,
            Err(err) => {
                warn!(error = %err, "SIGTERM handler unavailable, waiting for Ctrl+C only");
                return ctrl_c().await;
            }
        };

        tokio::select! {
            name = ctrl_c() => name,
            _ = sigterm.recv() => "SIGTERM",
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await
    }
}

async fn ctrl_c() -> &'static str {
    match tokio::signal::ctrl_c().await {
        Ok(()) => "SIGINT",
        Err(err) => {
            warn!(error = %err, "Ctrl+C handler unavailable");
            std::future::pending().await
        }
    }
}
