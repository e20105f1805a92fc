//! Person records.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::id::PersonId;
use crate::model::validation::FieldInput;

/// A stored phonebook entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    pub number: String,
}

/// A client-supplied field value.
///
/// Scalars are cast to text the way the store would (`12345678` becomes
/// `"12345678"`); arrays and objects cannot be cast and are kept as their
/// JSON form so the validators can reject them per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Uncastable(String),
}

impl FieldValue {
    /// View of an optional field for the validators.
    pub fn input(value: Option<&FieldValue>) -> FieldInput<'_> {
        match value {
            None => FieldInput::Absent,
            Some(FieldValue::Text(s)) => FieldInput::Text(s.as_str()),
            Some(FieldValue::Uncastable(raw)) => FieldInput::Uncastable(raw.as_str()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => FieldValue::Text(s),
            Value::Number(n) => FieldValue::Text(n.to_string()),
            Value::Bool(b) => FieldValue::Text(b.to_string()),
            other => FieldValue::Uncastable(other.to_string()),
        })
    }
}

/// Candidate fields for a new person, as received from a client.
///
/// Fields are optional so that absence (or `null`) reaches the store's
/// `required` validators instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PersonDraft {
    #[serde(default)]
    pub name: Option<FieldValue>,
    #[serde(default)]
    pub number: Option<FieldValue>,
}

impl PersonDraft {
    pub fn new(name: impl Into<String>, number: impl Into<String>) -> Self {
        Self {
            name: Some(FieldValue::Text(name.into())),
            number: Some(FieldValue::Text(number.into())),
        }
    }
}
