mod config;
mod error;
mod protocol;
mod server;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use config::{Config, LogConfig};
use protocol::StoreHandler;
use server::Server;
use store::Store;
use tracing::{error, info};

/// In-memory key-value store served over HTTP
#[derive(Parser, Debug)]
#[command(name = "kvhttp", version, about)]
struct Args {
    /// Port to listen on, overriding the configured address's port
    port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn init_logging(log: &LogConfig) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log.level)),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received ctrl-c"),
        Err(e) => {
            error!("Failed to listen for ctrl-c: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    // Initialize logging
    init_logging(&config.log);

    info!("Starting kvhttp - in-memory key-value store over HTTP");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(Store::new());
    let handler = Arc::new(StoreHandler::new(Arc::clone(&store)));

    let server = Arc::new(Server::bind(config.server_addr, handler).await?);
    info!("Server listening on: {}", server.local_addr());

    server.run_until(shutdown_signal()).await;

    if store.is_empty()? {
        info!("Server stopped with an empty store");
    } else {
        info!("Server stopped with {} entries in the store", store.len()?);
    }
    Ok(())
}
