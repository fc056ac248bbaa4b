//! Configuration for the arena TCP server.
//!
//! Defaults can be overridden via environment variables, and those in
//! turn by command-line flags (see `main.rs`):
//!
//! - `ARENA_BIND_ADDR`   (default: "0.0.0.0")
//! - `ARENA_PORT`        (default: "3000")
//! - `ARENA_MAX_CLIENTS` (default: "1024")

use std::env;
use std::str::FromStr;

use anyhow::{Context, Result};

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// IP address / interface to bind to (e.g. "0.0.0.0" or "127.0.0.1").
    pub bind_addr: String,

    /// TCP port to listen on.
    pub port: u16,

    /// Maximum number of simultaneously connected clients.
    pub max_clients: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: "0.0.0.0".to_string(),
            port: 3000,
            max_clients: 1024,
        }
    }
}

impl Config {
    /// Construct a `Config` from environment variables, falling back
    /// to the defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();
        let bind_addr = env::var("ARENA_BIND_ADDR").unwrap_or(defaults.bind_addr);
        let port = read_env_or_default("ARENA_PORT", defaults.port)?;
        let max_clients = read_env_or_default("ARENA_MAX_CLIENTS", defaults.max_clients)?;

        Ok(Config {
            bind_addr,
            port,
            max_clients,
        })
    }

    /// Convenience: `addr:port` socket string.
    pub fn socket_addr_string(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

fn read_env_or_default<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value for {}: {:?}", key, val)),
        Err(_) => Ok(default),
    }
}
