//! Add/edit form state and local validation
//!
//! Validation is synchronous and never touches the network. A draft that
//! fails it is never submitted.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Number, Value};

use crate::types::{FieldKind, FieldSpec, FormMode, Record, ResourceSchema};

/// Per-field validation messages, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.insert(field.into(), message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.values().map(String::as_str).collect();
        write!(f, "{}", joined.join("; "))
    }
}

/// Draft record plus its validation messages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    pub draft: Record,
    pub errors: ValidationErrors,
}

impl FormState {
    /// Empty draft for the add modal.
    pub fn blank() -> Self {
        Self::default()
    }

    /// Draft prefilled from an existing record for the edit modal.
    pub fn from_record(record: &Record) -> Self {
        Self {
            draft: record.clone(),
            errors: ValidationErrors::new(),
        }
    }

    /// Update one field from user input and drop its stale error.
    pub fn set_field(&mut self, field: &str, value: impl Into<Value>) {
        self.draft.set(field, value);
        self.errors.0.remove(field);
    }

    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

fn trimmed_text(draft: &Record, field: &str) -> String {
    draft
        .text(field)
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn check_format(spec: &FieldSpec, value: &str) -> Option<String> {
    if let Some(max) = spec.max_length {
        if value.chars().count() > max {
            return Some(format!(
                "{} must be at most {max} characters",
                spec.label
            ));
        }
    }

    match spec.kind {
        FieldKind::Text => None,
        FieldKind::Number => parse_number(value)
            .is_none()
            .then(|| format!("{} must be a number", spec.label)),
        FieldKind::Date => NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .is_err()
            .then(|| format!("{} must be a date (YYYY-MM-DD)", spec.label)),
    }
}

fn parse_number(value: &str) -> Option<Number> {
    if let Ok(n) = value.parse::<i64>() {
        return Some(Number::from(n));
    }
    value
        .parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
}

/// Check a draft against the schema's field rules.
///
/// Required fields are checked first; format rules apply to non-empty values
/// of fields that are not already missing.
pub fn validate(schema: &ResourceSchema, draft: &Record) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for spec in schema.required_fields() {
        if trimmed_text(draft, &spec.name).is_empty() {
            errors.insert(spec.name.clone(), format!("{} is required", spec.label));
        }
    }
    for spec in &schema.fields {
        if errors.get(&spec.name).is_some() {
            continue;
        }
        let value = trimmed_text(draft, &spec.name);
        if value.is_empty() {
            continue;
        }
        if let Some(message) = check_format(spec, &value) {
            errors.insert(spec.name.clone(), message);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Build the request body from a validated draft.
///
/// Text and date values are trimmed and number fields become JSON numbers.
/// An empty optional field is left out when adding and sent as `null` when
/// editing, so a cleared value reaches the server. The key field never goes
/// into the body; it travels in the URL.
pub fn to_payload(schema: &ResourceSchema, draft: &Record, mode: &FormMode) -> Record {
    let mut payload = Record::new();
    for spec in &schema.fields {
        if spec.name == schema.key_field {
            continue;
        }
        let text = trimmed_text(draft, &spec.name);
        let value = if text.is_empty() {
            match mode {
                FormMode::Add => continue,
                FormMode::Edit { .. } => Value::Null,
            }
        } else {
            match spec.kind {
                FieldKind::Number => {
                    parse_number(&text).map_or(Value::String(text), Value::Number)
                }
                FieldKind::Text | FieldKind::Date => Value::String(text),
            }
        };
        payload.set(spec.name.as_str(), value);
    }
    payload
}
