//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     Parse CLI → Load config → Validate → Bind listener → Serve
//!
//! Shutdown (shutdown.rs / signals.rs):
//!     SIGTERM/SIGINT → trigger coordinator → stop accepting → drain → exit
//! ```
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and exits non-zero
//! - Config and outbound client are built before the listener accepts traffic

pub mod shutdown;
pub mod signals;

pub use shutdown::Shutdown;
