//! KeyTree Gateway - browse flat object storage as a directory tree
//!
//! Serves `GET /node/:bucket?prefix=` - one directory level of the bucket's
//! namespace as classified nodes - plus the static UI assets.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};
use url::Url;

use service::{Config, ServiceState};

/// KeyTree Gateway - browse flat object storage as a directory tree
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on for HTTP requests
    #[arg(short, long, default_value = "33333")]
    port: u16,

    /// Storage API endpoint override (for emulators)
    #[arg(long)]
    endpoint: Option<Url>,

    /// Bearer token for storage requests (defaults to $KEYTREE_STORAGE_TOKEN)
    #[arg(long)]
    token: Option<String>,

    /// Directory of static UI assets to serve at the root
    #[arg(short, long, default_value = "./static")]
    static_dir: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let (non_blocking_writer, _guard) = tracing_appender::non_blocking(std::io::stdout());
    let log_level: tracing::Level = args.log_level.parse().unwrap_or(tracing::Level::INFO);
    let env_filter = EnvFilter::builder()
        .with_default_directive(log_level.into())
        .from_env_lossy();

    let stdout_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_writer(non_blocking_writer)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(stdout_layer).init();

    tracing::info!("Starting KeyTree Gateway");

    // Create configuration
    let listen_addr = SocketAddr::from_str(&format!("0.0.0.0:{}", args.port))?;
    let mut config = Config::default();
    config.listen_addr = Some(listen_addr);
    config.storage_endpoint = args.endpoint;
    config.storage_token = args
        .token
        .or_else(|| std::env::var("KEYTREE_STORAGE_TOKEN").ok());
    config.credentials_path = Config::credentials_from_env();
    config.static_dir = args.static_dir.is_dir().then(|| args.static_dir.clone());
    config.log_level = log_level;

    // Validate the credential reference before touching the network
    config.validate_credentials()?;

    // Create state
    let state = match ServiceState::from_config(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to create service state: {}", e);
            std::process::exit(1);
        }
    };

    // Set up graceful shutdown
    let (shutdown_tx, shutdown_rx) = watch::channel(());
    let graceful_shutdown = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl+c");
        tracing::info!("Received shutdown signal");
        let _ = shutdown_tx.send(());
    };
    tokio::spawn(graceful_shutdown);

    // Build router
    let router = service::http::router(state, config.static_dir.clone());

    tracing::info!("Gateway listening on {}", listen_addr);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;

    let mut server_rx = shutdown_rx.clone();
    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = server_rx.changed().await;
        })
        .await?;

    tracing::info!("Gateway shutdown complete");
    Ok(())
}
