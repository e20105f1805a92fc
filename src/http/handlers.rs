//! Phonebook request handlers.
//!
//! Handlers stay thin: decode the request, make one store call, and hand
//! failures to [`ApiError`] for translation.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use chrono::Local;
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::model::{FieldValue, Person, PersonDraft};

/// Body accepted by the update endpoint. Other fields are ignored.
#[derive(Debug, Deserialize)]
pub struct NumberUpdate {
    #[serde(default)]
    pub number: Option<FieldValue>,
}

fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(error = %rejection.body_text(), "Rejected request body");
            Err(ApiError::MalformedBody)
        }
    }
}

pub async fn list_persons(State(state): State<AppState>) -> Result<Json<Vec<Person>>, ApiError> {
    let persons = state.store.find_all().await?;
    Ok(Json(persons))
}

pub async fn create_person(
    State(state): State<AppState>,
    payload: Result<Json<PersonDraft>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    let draft = body(payload)?;
    let person = state.store.insert(draft).await?;
    tracing::debug!(id = %person.id, "Created person");
    Ok(Json(person))
}

pub async fn get_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Person>, ApiError> {
    state
        .store
        .find_by_id(&id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn update_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NumberUpdate>, JsonRejection>,
) -> Result<Json<Person>, ApiError> {
    let update = body(payload)?;
    state
        .store
        .update_number(&id, update.number)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_person(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    match state.store.delete(&id).await? {
        Some(removed) => tracing::debug!(id = %removed.id, "Deleted person"),
        None => tracing::debug!(id = %id, "Delete of absent person"),
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn info(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let count = state.store.count().await?;
    Ok(Html(info_page(count, &Local::now().format("%a %b %d %Y %H:%M:%S GMT%z").to_string())))
}

/// HTML fragment reported by the info endpoint.
pub fn info_page(count: usize, timestamp: &str) -> String {
    format!("<p>Phonebook has info for {count} people.</p><p>{timestamp}</p>")
}
