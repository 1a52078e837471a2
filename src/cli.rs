//! Command-line interface.
//!
//! Flags mirror the config file and override whatever it (or the defaults)
//! provided. The config file itself is optional.

use std::path::PathBuf;

use clap::Parser;

use crate::config::ProxyConfig;

#[derive(Parser, Debug)]
#[command(name = "forward-proxy")]
#[command(about = "A forwarding HTTP proxy", long_about = None)]
pub struct Cli {
    /// Proxy listen address
    #[arg(short = 'a', long)]
    pub addr: Option<String>,

    /// Origin dispatch timeout in seconds
    #[arg(short = 'T', long)]
    pub target_timeout: Option<u64>,

    /// Log each proxied request
    #[arg(long)]
    pub verbose: Option<bool>,

    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Apply flag overrides on top of a loaded (or default) configuration.
    pub fn apply(&self, config: &mut ProxyConfig) {
        if let Some(addr) = &self.addr {
            config.listener.bind_address = addr.clone();
        }
        if let Some(secs) = self.target_timeout {
            config.upstream.target_timeout_secs = secs;
        }
        if let Some(verbose) = self.verbose {
            config.observability.verbose = verbose;
        }
    }
}
