//! Form validation layer
//!
//! Each form is a flat struct of submitted strings. Cleaning it runs every
//! rule (lengths and formats through `validator`, then choices, dates,
//! references and uniqueness) and either yields the typed payload for the
//! repository or the complete set of [`FieldErrors`].

pub mod account;
pub mod attendance;
pub mod employee;
pub mod notice;
pub mod request;
pub mod work;

use axum::response::{IntoResponse, Response};
use chrono::{NaiveDate, NaiveTime};
use http::StatusCode;
use serde::Serialize;
use shared::form::Choice;
use shared::{AppError, FieldErrors};
use thiserror::Error;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use crate::db::RepoError;
use crate::web::View;

pub const REQUIRED: &str = "This field is required.";
pub const INVALID_CHOICE: &str = "Select a valid choice.";
pub const INVALID_DATE: &str = "Enter a valid date.";
pub const INVALID_TIME: &str = "Enter a valid time.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";

/// Input widget a field is presented with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Widget {
    Text,
    Email,
    Password,
    Textarea,
    Select,
    Checkbox,
    Date,
    Time,
}

/// Declarative presentation of one form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub widget: Widget,
    pub required: bool,
}

impl FieldSpec {
    pub const fn new(name: &'static str, label: &'static str, widget: Widget) -> Self {
        Self {
            name,
            label,
            widget,
            required: false,
        }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }
}

/// Why a submitted form was not persisted
#[derive(Debug, Error)]
pub enum FormError {
    /// One or more fields failed validation
    #[error("Form has invalid fields")]
    Invalid(FieldErrors),

    /// The submission collides with an existing record
    #[error("Form conflicts with an existing record")]
    Conflict(FieldErrors),

    #[error(transparent)]
    Failed(#[from] AppError),
}

impl From<RepoError> for FormError {
    fn from(err: RepoError) -> Self {
        FormError::Failed(err.into())
    }
}

impl From<FieldErrors> for FormError {
    fn from(errors: FieldErrors) -> Self {
        FormError::Invalid(errors)
    }
}

impl FormError {
    /// Re-render the form with its errors (400 invalid, 409 conflict);
    /// anything else propagates
    pub fn rerender(self, view: impl FnOnce(&FieldErrors) -> View) -> Result<Response, AppError> {
        match self {
            FormError::Invalid(errors) => {
                Ok(view(&errors).status(StatusCode::BAD_REQUEST).into_response())
            }
            FormError::Conflict(errors) => {
                Ok(view(&errors).status(StatusCode::CONFLICT).into_response())
            }
            FormError::Failed(err) => Err(err),
        }
    }
}

/// Turn `validator` output into field errors
pub fn collect(result: Result<(), ValidationErrors>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if let Err(e) = result {
        for (field, list) in e.field_errors() {
            for err in list.iter() {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", err.code));
                errors.add(field.to_string(), message);
            }
        }
    }
    errors
}

/// Strip surrounding whitespace in place
pub fn trim<const N: usize>(fields: [&mut String; N]) {
    for field in fields {
        let trimmed = field.trim();
        if trimmed.len() != field.len() {
            *field = trimmed.to_string();
        }
    }
}

/// Record [`REQUIRED`] when blank; true when a value is present
pub fn required(errors: &mut FieldErrors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.add(field, REQUIRED);
        false
    } else {
        true
    }
}

/// Parse an enumerated choice; blank falls back to `default` when given
pub fn choice<C: Choice>(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    default: Option<C>,
) -> Option<C> {
    let value = value.trim();
    if value.is_empty() {
        if default.is_none() {
            errors.add(field, REQUIRED);
        }
        return default;
    }
    let parsed = C::parse(value);
    if parsed.is_none() {
        errors.add(
            field,
            format!("{INVALID_CHOICE} {value} is not one of the available choices."),
        );
    }
    parsed
}

/// Required ISO date (`YYYY-MM-DD`)
pub fn date(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveDate> {
    if !required(errors, field, value) {
        return None;
    }
    let parsed = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok();
    if parsed.is_none() {
        errors.add(field, INVALID_DATE);
    }
    parsed
}

/// Optional time of day, `HH:MM` or `HH:MM:SS`
pub fn optional_time(errors: &mut FieldErrors, field: &str, value: &str) -> Option<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    let parsed = NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .ok();
    if parsed.is_none() {
        errors.add(field, INVALID_TIME);
    }
    parsed
}

/// Required record id from a selector
pub fn id(errors: &mut FieldErrors, field: &str, value: &str) -> Option<i64> {
    if !required(errors, field, value) {
        return None;
    }
    let parsed = value.trim().parse().ok();
    if parsed.is_none() {
        errors.add(field, INVALID_CHOICE);
    }
    parsed
}

/// HTML checkbox: present and truthy means checked
pub fn checkbox(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "on" | "true" | "1" | "yes"
    )
}

/// Trimmed value, or `None` when blank
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

/// Email that may be left blank
pub fn optional_email(errors: &mut FieldErrors, field: &str, value: &str) {
    let value = value.trim();
    if !value.is_empty() && !value.validate_email() {
        errors.add(field, INVALID_EMAIL);
    }
}

/// Letters, digits and `@ . + - _` only
pub fn validate_username(value: &str) -> Result<(), ValidationError> {
    let valid = value
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'));
    if valid {
        Ok(())
    } else {
        Err(ValidationError::new("username").with_message(
            "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                .into(),
        ))
    }
}
