//! Shared utilities for integration testing.

use async_trait::async_trait;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use phonebook::config::PhonebookConfig;
use phonebook::model::{FieldValue, Person, PersonDraft};
use phonebook::store::{PersonStore, StoreError, StoreResult};
use phonebook::{HttpServer, MemoryStore, Shutdown};

/// A running server bound to an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config for tests: loopback, ephemeral port, no static files.
pub fn test_config() -> PhonebookConfig {
    let mut config = PhonebookConfig::default();
    config.listener.host = "127.0.0.1".into();
    config.listener.port = 0;
    config.static_files.enabled = false;
    config
}

/// Start a server over an empty in-memory store.
pub async fn start_server() -> TestServer {
    start_server_with(test_config(), Arc::new(MemoryStore::new())).await
}

/// Start a server with the given config and store.
pub async fn start_server_with(config: PhonebookConfig, store: Arc<dyn PersonStore>) -> TestServer {
    let listener = TcpListener::bind(config.listener.bind_address()).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, store);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;

    let client = reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap();

    TestServer { addr, client, shutdown }
}

/// A store whose every operation fails as if the backend were unreachable.
pub struct FailingStore;

fn unavailable<T>() -> StoreResult<T> {
    Err(StoreError::Unavailable("connection refused".into()))
}

#[async_trait]
impl PersonStore for FailingStore {
    async fn find_all(&self) -> StoreResult<Vec<Person>> {
        unavailable()
    }

    async fn count(&self) -> StoreResult<usize> {
        unavailable()
    }

    async fn insert(&self, _draft: PersonDraft) -> StoreResult<Person> {
        unavailable()
    }

    async fn find_by_id(&self, _id: &str) -> StoreResult<Option<Person>> {
        unavailable()
    }

    async fn update_number(&self, _id: &str, _number: Option<FieldValue>) -> StoreResult<Option<Person>> {
        unavailable()
    }

    async fn delete(&self, _id: &str) -> StoreResult<Option<Person>> {
        unavailable()
    }
}
