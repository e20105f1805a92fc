//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign x-request-id)
//!     → access_log.rs (buffer POST body, time the request)
//!     → server.rs router → handlers.rs
//!         → PersonStore
//!         → error.rs (store errors → status + message)
//!     → access log line, metrics
//!     → Send to client
//! ```

pub mod access_log;
pub mod error;
pub mod handlers;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::{RequestIdExt, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
