//! Request scheme validation.
//!
//! A forward proxy only ever dials plain HTTP or HTTPS origins; anything else
//! in the request target is refused before any dispatch happens. Schemes
//! arrive already lowercased from the URI parser, so an exact match suffices.

/// Whether the proxy is willing to dial an origin with this scheme.
pub fn is_supported(scheme: &str) -> bool {
    matches!(scheme, "http" | "https")
}
