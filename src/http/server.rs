//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with a catch-all handler
//! - Hand every absolute-form request to the relay pipeline
//! - Answer non-proxy (origin-form) requests directly
//! - Serve with graceful shutdown
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → absolute-form?  → scheme gate → sanitize + annotate → dispatch → stream back
//!     → origin-form?    → GET /ping → 200 "pong"; anything else → 500
//! ```

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::trace::TraceLayer;

use crate::config::ProxyConfig;
use crate::proxy::{headers, relay, scheme, Upstream};

/// Application state injected into the handler.
///
/// Read-only after startup; requests share nothing else.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub upstream: Arc<Upstream>,
}

/// HTTP server for the forward proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// Fails if the outbound client cannot be built.
    pub fn new(config: ProxyConfig) -> Result<Self, std::io::Error> {
        let upstream = Upstream::new(config.upstream.target_timeout())?;
        let state = AppState {
            config: Arc::new(config),
            upstream: Arc::new(upstream),
        };

        let router = Router::new()
            .fallback(handle)
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Ok(Self { router })
    }

    /// Run the server on the given listener until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "proxy listening");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("shutdown signal received");
            })
            .await?;

        tracing::info!("proxy stopped");
        Ok(())
    }
}

/// Catch-all entry point.
///
/// Proxy requests carry an absolute-form target (the URI has a scheme);
/// everything else is a request addressed to the proxy itself.
async fn handle(
    State(state): State<AppState>,
    ConnectInfo(peer_addr): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    if request.uri().scheme().is_none() {
        return nonproxy(request);
    }
    proxy(state, peer_addr, request).await
}

/// Direct responses for origin-form requests.
fn nonproxy(request: Request<Body>) -> Response {
    if request.method() == Method::GET && request.uri().path() == "/ping" {
        return (StatusCode::OK, "pong").into_response();
    }
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "This is a proxy server. Does not respond to non-proxy requests.\n",
    )
        .into_response()
}

/// The relay pipeline: scheme gate, sanitize, annotate, dispatch, stream back.
async fn proxy(state: AppState, peer_addr: SocketAddr, request: Request<Body>) -> Response {
    let uri_scheme = request.uri().scheme_str().unwrap_or_default();
    if !scheme::is_supported(uri_scheme) {
        tracing::warn!(
            peer_addr = %peer_addr,
            scheme = uri_scheme,
            "rejecting request with unsupported scheme"
        );
        return (
            StatusCode::BAD_REQUEST,
            format!("Invalid scheme: {uri_scheme}\n"),
        )
            .into_response();
    }

    if state.config.observability.verbose {
        tracing::debug!(
            peer_addr = %peer_addr,
            method = %request.method(),
            uri = %request.uri(),
            "proxying request"
        );
    }

    let (mut parts, body) = request.into_parts();
    headers::strip_hop_by_hop(&mut parts.headers);
    headers::append_forwarded_for(&mut parts.headers, &peer_addr.to_string());
    let outbound = Request::from_parts(parts, body);

    let response = match state.upstream.relay(outbound).await {
        Ok(response) => response,
        Err(err) => {
            tracing::error!(peer_addr = %peer_addr, error = %err, "origin dispatch failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error\n").into_response();
        }
    };

    if state.config.observability.verbose {
        tracing::debug!(
            peer_addr = %peer_addr,
            status = %response.status(),
            "origin responded"
        );
    }

    let (mut parts, body) = response.into_parts();
    headers::strip_hop_by_hop(&mut parts.headers);
    Response::from_parts(parts, relay::relay_body(body, peer_addr))
}
