// studygenius - Stateless study-material generation gateway for the Gemini API

use anyhow::Result;
use clap::Parser;
use std::net::SocketAddr;
use studygenius::cli::Args;
use studygenius::config::AppConfig;
use studygenius::gemini::GeminiClient;
use studygenius::server::create_router;
use studygenius::utils::logging;
use tokio::signal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Phase 1: Parse CLI arguments and load configuration
    let args = Args::parse();
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    // Phase 2: Initialize logging
    logging::init(&config.logging)?;
    info!("Starting studygenius v{}", env!("CARGO_PKG_VERSION"));

    // Phase 3: Construct the Gemini client. Fails fast when the credential is
    // absent so no request is ever attempted unauthenticated.
    let gemini_client = GeminiClient::new(&config.gemini)?;
    info!("Gemini client ready (model: {})", gemini_client.model());

    // Phase 4: Build and start the HTTP server
    let app = create_router(config.clone(), gemini_client)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;

    info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Phase 5: Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down gracefully");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
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
