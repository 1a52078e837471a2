//! Header sanitization and forwarding-chain annotation.
//!
//! # Responsibilities
//! - Strip hop-by-hop headers from outbound requests and inbound responses
//! - Strip any header named by a `Connection` token
//! - Append the client host to the `X-Forwarded-For` chain
//!
//! # Design Decisions
//! - Operates on [`HeaderMap`]: case-insensitive lookup and removal,
//!   case-preserving multi-value storage
//! - Sanitization is applied symmetrically in both directions
//! - A malformed remote address skips annotation but never aborts the request

#![allow(clippy::declare_interior_mutable_const)]

use std::net::SocketAddr;

use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, CONNECTION, PROXY_AUTHENTICATE, PROXY_AUTHORIZATION, TE,
    TRAILER, TRANSFER_ENCODING, UPGRADE,
};

pub const KEEP_ALIVE: HeaderName = HeaderName::from_static("keep-alive");
pub const X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

/// Headers that are meaningful for a single transport hop only and must not
/// cross the proxy in either direction.
static HOP_BY_HOP: [HeaderName; 8] = [
    KEEP_ALIVE,
    TRANSFER_ENCODING,
    TE,
    CONNECTION,
    TRAILER,
    UPGRADE,
    PROXY_AUTHORIZATION,
    PROXY_AUTHENTICATE,
];

/// Remove every hop-by-hop header, plus every header named by a token in the
/// `Connection` header.
///
/// The `Connection` values are captured before the fixed set deletes the
/// `Connection` entry itself, otherwise the token list would already be gone.
/// Removing a name drops all of its values. Applying this twice is a no-op.
pub fn strip_hop_by_hop(headers: &mut HeaderMap) {
    let connection_values: Vec<HeaderValue> =
        headers.get_all(CONNECTION).iter().cloned().collect();

    for name in &HOP_BY_HOP {
        headers.remove(name);
    }

    for value in &connection_values {
        for token in list(value.as_bytes()) {
            if let Ok(name) = HeaderName::from_bytes(token) {
                headers.remove(name);
            }
        }
    }
}

/// Split a comma separated header value into trimmed, non-empty tokens.
fn list(value: &[u8]) -> impl Iterator<Item = &[u8]> {
    value
        .split(|c| *c == b',')
        .map(|token| token.trim_ascii())
        .filter(|token| !token.is_empty())
}

/// Record `remote_addr`'s host at the end of the `X-Forwarded-For` chain.
///
/// Existing chain values are joined with the new host, comma-space separated.
/// With no prior chain the header is set to the client host alone. An
/// unparseable remote address is logged and the annotation skipped; the
/// request continues either way.
pub fn append_forwarded_for(headers: &mut HeaderMap, remote_addr: &str) {
    let host = match remote_addr.parse::<SocketAddr>() {
        Ok(addr) => addr.ip().to_string(),
        Err(err) => {
            tracing::warn!(
                remote_addr,
                error = %err,
                "could not parse remote address, skipping X-Forwarded-For"
            );
            return;
        }
    };

    let mut chain: Vec<String> = headers
        .get_all(&X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok().map(str::to_owned))
        .collect();
    chain.push(host);

    match HeaderValue::from_str(&chain.join(", ")) {
        Ok(value) => {
            headers.insert(&X_FORWARDED_FOR, value);
        }
        Err(err) => {
            tracing::warn!(error = %err, "could not build X-Forwarded-For value");
        }
    }
}
