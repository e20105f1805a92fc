//! Phonebook web service library.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod model;
pub mod observability;
pub mod store;

pub use config::PhonebookConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use model::{Person, PersonDraft, PersonId};
pub use store::{MemoryStore, PersonStore, StoreError};
