//! Origin dispatch and response body relay.
//!
//! # Responsibilities
//! - Build the outbound HTTP client once at startup (HTTP and HTTPS origins)
//! - Dispatch a sanitized request to its origin, bounded by the target timeout
//! - Re-stream the origin body to the client, logging mid-stream failures
//!
//! # Design Decisions
//! - One dispatch per request, never retried
//! - The timeout covers connect through response headers; body streaming
//!   afterwards is unbounded
//! - Dropping the origin body closes the origin connection on every exit path

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use futures_util::TryStreamExt;
use http_body_util::BodyStream;
use hyper::body::Incoming;
use hyper::{Request, Response};
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use hyper_rustls::HttpsConnector;
use thiserror::Error;

/// Error type for origin dispatch.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The origin did not respond within the configured target timeout.
    #[error("origin dispatch timed out after {0:?}")]
    TimedOut(Duration),

    /// The transport failed (unreachable origin, refused connection, protocol error).
    #[error("origin dispatch failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),
}

/// Outbound client shared by every request handler.
///
/// Built once at startup and never mutated afterwards.
pub struct Upstream {
    client: Client<HttpsConnector<HttpConnector>, Body>,
    target_timeout: Duration,
}

impl Upstream {
    /// Build the outbound client. Fails if the native root certificates
    /// cannot be loaded.
    pub fn new(target_timeout: Duration) -> Result<Self, std::io::Error> {
        let https = hyper_rustls::HttpsConnectorBuilder::new()
            .with_native_roots()?
            .https_or_http()
            .enable_http1()
            .build();
        let client = Client::builder(TokioExecutor::new()).build(https);

        Ok(Self {
            client,
            target_timeout,
        })
    }

    /// Dispatch `req` to its origin, bounded by the target timeout.
    pub async fn relay(&self, req: Request<Body>) -> Result<Response<Incoming>, RelayError> {
        match tokio::time::timeout(self.target_timeout, self.client.request(req)).await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(err)) => Err(RelayError::Transport(err)),
            Err(_) => Err(RelayError::TimedOut(self.target_timeout)),
        }
    }
}

/// Wrap the origin body so it streams through to the client byte-for-byte.
///
/// The status line and headers are already on the wire when the body flows,
/// so a mid-stream failure can only be logged; the stream ends and the
/// connection closes with it.
pub fn relay_body(body: Incoming, peer_addr: SocketAddr) -> Body {
    let stream = BodyStream::new(body)
        .try_filter_map(|frame| std::future::ready(Ok(frame.into_data().ok())))
        .inspect_err(move |err| {
            tracing::warn!(
                peer_addr = %peer_addr,
                error = %err,
                "could not forward origin response body"
            );
        });

    Body::from_stream(stream)
}
