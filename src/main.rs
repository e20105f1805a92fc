//! Phonebook web service.
//!
//! # Architecture Overview
//!
//! ```text
//! Client Request
//!     → request id → trace → body limit → access log
//!     → router
//!         /api/persons, /info → handlers → Arc<dyn PersonStore>
//!         anything else       → static build directory
//!     → error.rs: MalformedId / Validation → 400, None → 404, other → 500
//! ```

use clap::Parser;
use std::path::PathBuf;

use phonebook::config::load_config;
use phonebook::http::HttpServer;
use phonebook::lifecycle::{signals, startup, Shutdown};
use phonebook::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "phonebook")]
#[command(about = "Phonebook CRUD web service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    logging::init(&config.observability);
    tracing::info!("phonebook v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address(),
        snapshot_path = ?config.storage.snapshot_path,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        // Address already checked by config validation.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let store = startup::open_store(&config)?;
    let listener = startup::bind_listener(&config).await?;

    let shutdown = Shutdown::new();
    signals::spawn_signal_listener(shutdown.clone());

    let server = HttpServer::new(config, store);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
