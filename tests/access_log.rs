//! Access log lines as emitted by a running server.

use serde_json::json;
use std::io;
use std::sync::{Arc, Mutex};

use phonebook::MemoryStore;

mod common;

const ABSENT_ID: &str = "5f1a2b3c4d5e6f7a8b9c0d1e";

/// Log output shared between the subscriber and the test.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn access_lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap();
        String::from_utf8_lossy(&bytes)
            .lines()
            .filter(|l| l.contains("phonebook::access"))
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
    let captured = Captured::default();
    let writer = captured.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    (captured, tracing::subscriber::set_default(subscriber))
}

// The current-thread runtime keeps the server tasks on this thread, where
// the capturing subscriber is the default.
#[tokio::test]
async fn test_every_request_is_logged() {
    let (captured, _guard) = capture();

    let mut config = common::test_config();
    config.security.max_body_size = 64;
    let server = common::start_server_with(config, Arc::new(MemoryStore::new())).await;

    let res = server
        .client
        .post(server.url("/api/persons"))
        .json(&json!({ "name": "Ann", "number": "040-1234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 200);

    let res = server
        .client
        .post(server.url("/api/persons"))
        .json(&json!({ "name": "A".repeat(200), "number": "040-1234567" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);

    let res = server
        .client
        .put(server.url(&format!("/api/persons/{ABSENT_ID}")))
        .json(&json!({ "number": "0".repeat(200) }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), 413);

    let res = server.client.get(server.url("/api/persons")).send().await.unwrap();
    assert_eq!(res.status(), 200);

    let lines = captured.access_lines();
    assert_eq!(lines.len(), 4, "{lines:#?}");
    assert!(lines[0].contains("POST /api/persons 200"), "{}", lines[0]);
    assert!(lines[0].contains(r#"{"name":"Ann","number":"040-1234567"}"#), "{}", lines[0]);
    assert!(lines[1].contains("POST /api/persons 413"), "{}", lines[1]);
    assert!(lines[2].contains(&format!("PUT /api/persons/{ABSENT_ID} 413")), "{}", lines[2]);
    assert!(lines[3].contains("GET /api/persons 200"), "{}", lines[3]);
    assert!(lines[3].contains(" ms"), "{}", lines[3]);
}
