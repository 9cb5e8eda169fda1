mod app;
mod config;
mod context;
mod handlers;
mod state;
mod upstream;

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use journal_core::cache_policy::{Clock, SystemClock};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState, upstream::HttpNotesApi};

/// Journal - notes, posts and wine labels behind a caching proxy
#[derive(Parser, Debug)]
#[command(name = "journal")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST")]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT")]
    port: u16,

    /// Base URL of the remote notes API (in-memory demo data when unset)
    #[arg(long, env = "UPSTREAM_API_URL")]
    upstream_url: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "journal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = init_state(cli.upstream_url.as_deref(), config)?;

    // Build the application router
    let app = create_app(state);

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Pick the upstream backend.
fn init_state(upstream_url: Option<&str>, config: Config) -> Result<AppState> {
    let Some(url) = upstream_url.filter(|url| !url.trim().is_empty()) else {
        tracing::warn!("UPSTREAM_API_URL not set, serving in-memory demo data");
        return Ok(AppState::with_demo_data(config));
    };

    let api = HttpNotesApi::new(url, config.upstream_timeout())?;
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    tracing::info!(
        upstream = %api.base_url(),
        timeout_seconds = config.upstream_timeout_seconds,
        session_cookie = %config.session_cookie_name,
        "Using remote notes API"
    );

    Ok(AppState::new(Arc::new(api), clock, config))
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }
}
