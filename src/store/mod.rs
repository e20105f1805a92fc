//! Record store subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → PersonStore (async trait seam)
//!         → id parse         (MalformedId on bad encoding)
//!         → field validators (Validation on rejected fields)
//!         → memory.rs        (concurrent map + optional JSON snapshot)
//!     → StoreResult<T>
//! ```
//!
//! # Design Decisions
//! - "Not found" is `Ok(None)`, never an error
//! - Identifiers arrive as raw strings; the store owns their encoding
//! - Errors form a closed enum so callers can match exhaustively

pub mod error;
pub mod memory;

use async_trait::async_trait;

use crate::model::{FieldValue, Person, PersonDraft};

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;

/// Persistence collaborator for person records.
#[async_trait]
pub trait PersonStore: Send + Sync {
    /// All records in creation order.
    async fn find_all(&self) -> StoreResult<Vec<Person>>;

    /// Number of stored records.
    async fn count(&self) -> StoreResult<usize>;

    /// Validate and persist a new record, assigning its id.
    async fn insert(&self, draft: PersonDraft) -> StoreResult<Person>;

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Person>>;

    /// Replace the number of an existing record, re-running all validators
    /// on the resulting record. Returns the updated record.
    async fn update_number(&self, id: &str, number: Option<FieldValue>) -> StoreResult<Option<Person>>;

    /// Hard delete. Returns the removed record, if there was one.
    async fn delete(&self, id: &str) -> StoreResult<Option<Person>>;
}
