//! Forwarding HTTP Proxy
//!
//! A forward HTTP proxy built with Tokio and Axum.
//!
//! # Architecture Overview
//!
//! ```text
//!                   ┌───────────────────────────────────────────────┐
//!                   │                FORWARD PROXY                  │
//!                   │                                               │
//!   Client Request  │  ┌──────────┐   ┌─────────┐   ┌────────────┐ │
//!   ────────────────┼─▶│ listener │──▶│  http   │──▶│   proxy    │ │
//!   (absolute URI)  │  │ (tokio)  │   │ server  │   │  pipeline  │ │
//!                   │  └──────────┘   └─────────┘   └─────┬──────┘ │
//!                   │                                     │        │
//!                   │            scheme gate → sanitize → │        │
//!                   │            annotate → dispatch      ▼        │
//!   Client Response │                               ┌────────────┐ │
//!   ◀───────────────┼───────────────────────────────│  upstream  │─┼──── Origin
//!                   │        (streamed body)        │   client   │ │     Server
//!                   │                               └────────────┘ │
//!                   └───────────────────────────────────────────────┘
//! ```
//!
//! Each connection is handled concurrently; per-request processing is a
//! single sequential pass with no shared mutable state.

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use forward_proxy::cli::Cli;
use forward_proxy::config::{load_config, validate_config, ConfigError, ProxyConfig};
use forward_proxy::http::HttpServer;
use forward_proxy::lifecycle::{signals, Shutdown};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ProxyConfig::default(),
    };
    cli.apply(&mut config);

    // Flags may have re-introduced an invalid value; check the final config.
    validate_config(&config).map_err(ConfigError::Validation)?;

    // Initialize tracing subscriber
    let default_filter = if config.observability.verbose {
        "forward_proxy=debug,tower_http=debug"
    } else {
        "forward_proxy=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("forward-proxy v0.1.0 starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        target_timeout_secs = config.upstream.target_timeout_secs,
        verbose = config.observability.verbose,
        "Configuration loaded"
    );

    // Bind TCP listener; failure here is fatal.
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    let shutdown_rx = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config)?;
    server.run(listener, shutdown_rx).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
