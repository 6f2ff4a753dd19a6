//! songbook-api - song catalog HTTP service
//!
//! Configuration comes from (highest priority first) command-line flags,
//! environment variables, a TOML file and compiled defaults.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use songbook_api::services::{HttpSongDetailClient, SongService};
use songbook_api::{build_router, AppState};
use songbook_common::config::{ConfigOverrides, ServiceConfig};
use songbook_common::db::init_database;

/// Maximum pooled SQLite connections
const MAX_DB_CONNECTIONS: u32 = 10;

#[derive(Parser, Debug)]
#[command(name = "songbook-api")]
#[command(about = "Song catalog service with lyric search and pagination")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long, env = "HTTP_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "BIND_HOST")]
    host: Option<String>,

    /// SQLite connection URL
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Base URL of the song-detail API
    #[arg(long, env = "SONG_DETAIL_API")]
    song_detail_api: Option<String>,

    /// Run mode: development or production
    #[arg(short, long, env = "MODE")]
    mode: Option<String>,

    /// Song-detail request timeout in seconds
    #[arg(long, env = "DETAIL_TIMEOUT_SECS")]
    detail_timeout_secs: Option<u64>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            http_port: self.port,
            bind_host: self.host.clone(),
            database_url: self.database_url.clone(),
            song_detail_api: self.song_detail_api.clone(),
            mode: self.mode.clone(),
            detail_timeout_secs: self.detail_timeout_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Mode decides the default log filter, so config resolves first
    let config = ServiceConfig::load(args.overrides(), args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.mode.default_log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting songbook-api v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    info!(
        mode = %config.mode,
        detail_api = %config.song_detail_api,
        "Configuration resolved"
    );

    let pool = init_database(&config.database_url, MAX_DB_CONNECTIONS)
        .await
        .context("Failed to initialize database")?;
    info!("Database ready: {}", config.database_url);

    let detail_client =
        HttpSongDetailClient::from_config(&config).context("Failed to build song-detail client")?;
    let service = SongService::new(pool, Arc::new(detail_client), &config);
    let app = build_router(AppState::new(service));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("songbook-api listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
