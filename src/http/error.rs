//! Translation of store outcomes into HTTP responses.
//!
//! # Precedence
//! 1. Malformed id            → 400 "malformed id"
//! 2. Validation on `name`    → 400 "Name must be at least 3 characters"
//! 3. Validation on `number`  → 400, message depends on the validator kind
//! 4. Anything else           → 500, logged, never echoed to the client

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::model::{Field, ValidationErrors, ValidatorKind};
use crate::store::StoreError;

pub const MALFORMED_ID: &str = "malformed id";
pub const INVALID_NAME: &str = "Name must be at least 3 characters";
pub const INVALID_PHONE_NUMBER: &str = "Please enter a valid phone number";
pub const SHORT_NUMBER: &str = "Number must be at least 8 characters";
pub const MALFORMED_BODY: &str = "malformed request body";
pub const INTERNAL: &str = "internal server error";

/// JSON error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

/// Errors a handler can return.
#[derive(Debug)]
pub enum ApiError {
    /// Identifier did not parse.
    MalformedId,
    /// `name` was rejected.
    InvalidName,
    /// `number` failed the phone number format check.
    InvalidPhoneNumber,
    /// `number` was absent or too short.
    ShortNumber,
    /// Request body could not be decoded.
    MalformedBody,
    /// No record with the requested id. Responds with an empty body.
    NotFound,
    /// Unrecognized failure, handled by the terminal 500 response.
    Internal(StoreError),
}

impl ApiError {
    /// Status code and message for this error. `NotFound` carries no message.
    pub fn status_and_message(&self) -> (StatusCode, Option<&'static str>) {
        match self {
            ApiError::MalformedId => (StatusCode::BAD_REQUEST, Some(MALFORMED_ID)),
            ApiError::InvalidName => (StatusCode::BAD_REQUEST, Some(INVALID_NAME)),
            ApiError::InvalidPhoneNumber => (StatusCode::BAD_REQUEST, Some(INVALID_PHONE_NUMBER)),
            ApiError::ShortNumber => (StatusCode::BAD_REQUEST, Some(SHORT_NUMBER)),
            ApiError::MalformedBody => (StatusCode::BAD_REQUEST, Some(MALFORMED_BODY)),
            ApiError::NotFound => (StatusCode::NOT_FOUND, None),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, Some(INTERNAL)),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::MalformedId(_) => ApiError::MalformedId,
            StoreError::Validation(violations) => match translate_validation(&violations) {
                Some(api) => api,
                None => ApiError::Internal(StoreError::Validation(violations)),
            },
            err @ (StoreError::Io(_) | StoreError::Snapshot(_) | StoreError::Unavailable(_)) => {
                ApiError::Internal(err)
            }
        }
    }
}

/// Map field violations to an error, `name` first.
fn translate_validation(errors: &ValidationErrors) -> Option<ApiError> {
    if errors.field(Field::Name).is_some() {
        return Some(ApiError::InvalidName);
    }
    errors.field(Field::Number).map(|v| match v.kind {
        ValidatorKind::UserDefined => ApiError::InvalidPhoneNumber,
        ValidatorKind::Required | ValidatorKind::MinLength | ValidatorKind::Cast => ApiError::ShortNumber,
    })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(ref e) = self {
            tracing::error!(error = %e, "Unhandled store error");
        }

        match self.status_and_message() {
            (status, Some(error)) => (status, Json(ErrorBody { error })).into_response(),
            (status, None) => status.into_response(),
        }
    }
}
