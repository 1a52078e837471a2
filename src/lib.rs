//! Forwarding HTTP Proxy Library
//!
//! Accepts client requests in absolute-URI form, relays them to the addressed
//! origin with proxy-unsafe headers stripped and the client recorded in the
//! `X-Forwarded-For` chain, and streams the origin response back.

pub mod cli;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod proxy;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
