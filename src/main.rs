// folio-relay - Portfolio assistant chat relay
// Author: kelexine (https://github.com/kelexine)

use anyhow::Result;
use clap::Parser;
use folio_relay::cache::ResponseCache;
use folio_relay::cli::Args;
use folio_relay::config::AppConfig;
use folio_relay::knowledge::PortfolioProfile;
use folio_relay::relay::build_relay;
use folio_relay::server::create_router;
use folio_relay::upstream::HttpUpstream;
use folio_relay::utils::logging;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Phase 1: Load configuration
    let config = AppConfig::load(&args)?;

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting folio-relay v{}", env!("CARGO_PKG_VERSION"));

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(config.server.workers.max(1))
        .enable_all()
        .build()?;

    runtime.block_on(serve(config))
}

async fn serve(config: AppConfig) -> Result<()> {
    // Phase 3: Load portfolio knowledge
    let portfolio = PortfolioProfile::load(config.knowledge.profile_path.as_deref())?;
    info!("Portfolio knowledge ready for {}", portfolio.profile.name);

    // Phase 4: Build the relay. The cache lives as long as the process.
    let upstream = Arc::new(HttpUpstream::new(&config.upstream)?);
    let cache = Arc::new(ResponseCache::default());
    let relay = build_relay(&config, &portfolio, upstream, cache)?;

    if !relay.has_credential() {
        warn!(
            "{} is not set; /api/chat will answer with a configuration error",
            folio_relay::config::TOKEN_ENV
        );
    }
    info!("Model candidates: {}", relay.candidates().as_slice().join(", "));

    // Phase 5: Build and start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(config, relay, portfolio)?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 6: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
