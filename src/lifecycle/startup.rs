//! Startup orchestration.
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The store is opened before the listener binds (traffic only when ready)

use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::PhonebookConfig;
use crate::store::{MemoryStore, PersonStore, StoreResult};

/// Construct the record store described by the configuration.
pub fn open_store(config: &PhonebookConfig) -> StoreResult<Arc<dyn PersonStore>> {
    let store = match &config.storage.snapshot_path {
        Some(path) => MemoryStore::open(path)?,
        None => {
            tracing::warn!("No snapshot path configured; records are kept in memory only");
            MemoryStore::new()
        }
    };
    Ok(Arc::new(store))
}

/// Bind the configured listener address.
pub async fn bind_listener(config: &PhonebookConfig) -> std::io::Result<TcpListener> {
    let listener = TcpListener::bind(config.listener.bind_address()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");
    Ok(listener)
}
