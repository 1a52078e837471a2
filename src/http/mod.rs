//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, per-connection tasks)
//!     → absolute-form requests → proxy pipeline (crate::proxy)
//!     → origin-form requests   → built-in /ping handler
//! ```

pub mod server;

pub use server::HttpServer;
