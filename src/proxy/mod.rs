//! Request relay subsystem.
//!
//! # Data Flow
//! ```text
//! Absolute-form request (from http/server.rs)
//!     → scheme.rs (reject anything but http/https)
//!     → headers.rs (strip hop-by-hop, append X-Forwarded-For)
//!     → relay.rs (single dispatch to origin, bounded by the target timeout)
//!     → headers.rs again (strip hop-by-hop from the origin response)
//!     → response streamed back to the client
//! ```
//!
//! # Design Decisions
//! - One pass per request, no state revisited and nothing shared between requests
//! - Dispatch errors map to a generic 500; the cause stays in the logs
//! - No retries and no origin connection reuse beyond what a single dispatch needs

pub mod headers;
pub mod relay;
pub mod scheme;

pub use relay::{RelayError, Upstream};
