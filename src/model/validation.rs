//! Field validators for person records.
//!
//! Each field declares its validators in order; the first one that fails
//! is reported for that field. Every field is checked, so a single
//! [`ValidationErrors`] may carry violations for both `name` and `number`.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::fmt;

/// Minimum length of `name`, in characters.
pub const NAME_MIN_LEN: usize = 3;

/// Minimum length of `number`, in characters.
pub const NUMBER_MIN_LEN: usize = 8;

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{2,3}-[0-9]+$").expect("valid phone number regex"));

/// A validated field of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Number,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Number => "number",
        }
    }
}

/// The kind of validator that rejected a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidatorKind {
    /// Field was absent.
    #[serde(rename = "required")]
    Required,
    /// Value shorter than the declared minimum.
    #[serde(rename = "minlength")]
    MinLength,
    /// A custom predicate returned false.
    #[serde(rename = "user defined")]
    UserDefined,
    /// Value could not be cast to text (an array or object).
    #[serde(rename = "cast")]
    Cast,
}

impl ValidatorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidatorKind::Required => "required",
            ValidatorKind::MinLength => "minlength",
            ValidatorKind::UserDefined => "user defined",
            ValidatorKind::Cast => "cast",
        }
    }
}

/// A field as seen by the validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput<'a> {
    Absent,
    Text(&'a str),
    /// JSON form of a value that has no text representation.
    Uncastable(&'a str),
}

impl<'a> From<Option<&'a str>> for FieldInput<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldInput::Absent, FieldInput::Text)
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: Field,
    pub kind: ValidatorKind,
    pub message: String,
}

/// All violations found on a record, in field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    violations: Vec<FieldViolation>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// The violation recorded for `field`, if any.
    pub fn field(&self, field: Field) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == field)
    }

    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }

    fn push(&mut self, violation: Option<FieldViolation>) {
        if let Some(v) = violation {
            self.violations.push(v);
        }
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", v.field.as_str(), v.message)?;
        }
        Ok(())
    }
}

/// Whether `number` has the shape `NN-NNNN…` or `NNN-NNNN…` (ASCII digits).
pub fn is_phone_number(number: &str) -> bool {
    PHONE_NUMBER_RE.is_match(number)
}

/// Validate a full set of person fields.
pub fn validate_person(name: Option<&str>, number: Option<&str>) -> Result<(), ValidationErrors> {
    validate_fields(name.into(), number.into())
}

/// Validate fields that may carry values with no text form.
pub fn validate_fields(name: FieldInput<'_>, number: FieldInput<'_>) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();
    errors.push(check_name(name));
    errors.push(check_number(number));
    errors.into_result()
}

fn check_name(name: FieldInput<'_>) -> Option<FieldViolation> {
    let field = Field::Name;
    let name = match name {
        FieldInput::Absent => {
            return Some(violation(field, ValidatorKind::Required, "Path `name` is required.".into()))
        }
        FieldInput::Uncastable(raw) => return Some(cast_failure(field, raw)),
        FieldInput::Text(name) => name,
    };
    if name.chars().count() < NAME_MIN_LEN {
        return Some(violation(
            field,
            ValidatorKind::MinLength,
            format!("Path `name` (`{name}`) is shorter than the minimum allowed length ({NAME_MIN_LEN})."),
        ));
    }
    None
}

fn check_number(number: FieldInput<'_>) -> Option<FieldViolation> {
    let field = Field::Number;
    let number = match number {
        FieldInput::Absent => {
            return Some(violation(field, ValidatorKind::Required, "Path `number` is required.".into()))
        }
        FieldInput::Uncastable(raw) => return Some(cast_failure(field, raw)),
        FieldInput::Text(number) => number,
    };
    if number.chars().count() < NUMBER_MIN_LEN {
        return Some(violation(
            field,
            ValidatorKind::MinLength,
            format!("Path `number` (`{number}`) is shorter than the minimum allowed length ({NUMBER_MIN_LEN})."),
        ));
    }
    if !is_phone_number(number) {
        return Some(violation(
            field,
            ValidatorKind::UserDefined,
            format!("{number} is not a valid phone number!"),
        ));
    }
    None
}

fn cast_failure(field: Field, raw: &str) -> FieldViolation {
    violation(
        field,
        ValidatorKind::Cast,
        format!("Cast to string failed for value `{raw}` at path `{}`", field.as_str()),
    )
}

fn violation(field: Field, kind: ValidatorKind, message: String) -> FieldViolation {
    FieldViolation { field, kind, message }
}
