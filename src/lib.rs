pub mod auth;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod database;
pub mod error;
pub mod filter;
pub mod handlers;
pub mod middleware;
pub mod server;
pub mod services;
pub mod storage;

#[cfg(test)]
pub mod testing;

use tracing_subscriber::EnvFilter;

/// Installs the fmt subscriber. `RUST_LOG` wins; otherwise production logs
/// at `info` and everything else adds request traces at `debug`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if crate::is_production!() {
            EnvFilter::new("info")
        } else {
            EnvFilter::new("info,newsdesk_api=debug,tower_http=debug")
        }
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}
