//! Tic-tac-toe arena TCP server.

use anyhow::Result;
use arena_server::config::Config;
use arena_server::server;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "arena-server")]
#[clap(about = "Pairs anonymous clients into tic-tac-toe games")]
struct Cli {
    /// Interface to bind (overrides ARENA_BIND_ADDR)
    #[clap(short, long)]
    bind: Option<String>,

    /// Port to listen on (overrides ARENA_PORT)
    #[clap(short, long)]
    port: Option<u16>,

    /// Maximum simultaneous clients (overrides ARENA_MAX_CLIENTS)
    #[clap(short, long)]
    max_clients: Option<usize>,

    /// Enable debug logging
    #[clap(short, long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = Config::from_env()?;
    if let Some(bind) = cli.bind {
        config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(max_clients) = cli.max_clients {
        config.max_clients = max_clients;
    }

    info!(
        "Starting arena-server on {}:{} (max_clients = {})",
        config.bind_addr, config.port, config.max_clients
    );

    server::run(config).await
}
