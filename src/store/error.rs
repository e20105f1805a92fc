//! Store error taxonomy.

use thiserror::Error;

use crate::model::{IdParseError, ValidationErrors};

/// Errors raised by a [`PersonStore`](crate::store::PersonStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// Identifier does not match the store's id encoding.
    #[error("cast to id failed for value \"{0}\"")]
    MalformedId(String),

    /// One or more fields were rejected by their validators.
    #[error("person validation failed: {0}")]
    Validation(ValidationErrors),

    /// Snapshot file could not be read or written.
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot contents could not be encoded or decoded.
    #[error("snapshot format error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Backend could not serve the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl From<IdParseError> for StoreError {
    fn from(err: IdParseError) -> Self {
        StoreError::MalformedId(err.0)
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(err: ValidationErrors) -> Self {
        StoreError::Validation(err)
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PersonId;

    #[test]
    fn test_from_id_parse_error() {
        let err: StoreError = "bogus".parse::<PersonId>().unwrap_err().into();
        assert!(matches!(&err, StoreError::MalformedId(v) if v == "bogus"));
        assert_eq!(err.to_string(), "cast to id failed for value \"bogus\"");
    }

    #[test]
    fn test_error_display() {
        let err = StoreError::Unavailable("connection refused".into());
        assert_eq!(err.to_string(), "store unavailable: connection refused");
    }
}
