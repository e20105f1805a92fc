//! Phonebook domain model.
//!
//! # Data Flow
//! ```text
//! request body
//!     → PersonDraft (fields may be absent)
//!     → validation.rs (required / minlength / format per field)
//!     → Person (id assigned by the store, always complete)
//! ```

pub mod id;
pub mod person;
pub mod validation;

pub use id::{IdParseError, PersonId};
pub use person::{FieldValue, Person, PersonDraft};
pub use validation::{Field, FieldInput, FieldViolation, ValidationErrors, ValidatorKind};
