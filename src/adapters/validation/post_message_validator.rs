//! Post message validator - `POST /discord/post` body rules.
//!
//! Validates manually against the expected shape:
//!
//! | field     | rule                      |
//! |-----------|---------------------------|
//! | `message` | required, non-empty string |
//! | `username`| optional string           |
//! | `userId`  | optional string           |
//!
//! Unknown fields are ignored.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::relay::PostMessage;

/// Flattened validation failures.
///
/// `formErrors` describe the body as a whole, `fieldErrors` are keyed by
/// field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyValidationErrors {
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl BodyValidationErrors {
    fn form(message: impl Into<String>) -> Self {
        Self {
            form_errors: vec![message.into()],
            ..Default::default()
        }
    }

    fn add_field(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    /// Returns true if nothing was reported.
    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

/// Parse and validate a raw request body.
pub fn validate_post_body(body: &[u8]) -> Result<PostMessage, BodyValidationErrors> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| BodyValidationErrors::form(format!("Invalid JSON: {}", e)))?;
    validate_post_value(value)
}

/// Validate an already parsed body.
pub fn validate_post_value(value: Value) -> Result<PostMessage, BodyValidationErrors> {
    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(BodyValidationErrors::form(format!(
                "Expected object, received {}",
                type_name(&other)
            )))
        }
    };

    let mut errors = BodyValidationErrors::default();

    let message = match fields.get("message") {
        None => {
            errors.add_field("message", "Required");
            None
        }
        Some(Value::String(s)) if s.is_empty() => {
            errors.add_field("message", "message is required");
            None
        }
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.add_field(
                "message",
                format!("Expected string, received {}", type_name(other)),
            );
            None
        }
    };

    let username = optional_string(&fields, "username", &mut errors);
    let user_id = optional_string(&fields, "userId", &mut errors);

    match message {
        Some(message) if errors.is_empty() => PostMessage::new(message, username, user_id)
            .map_err(|e| {
                let mut errors = BodyValidationErrors::default();
                errors.add_field(e.field(), e.to_string());
                errors
            }),
        _ => Err(errors),
    }
}

fn optional_string(
    fields: &Map<String, Value>,
    field: &str,
    errors: &mut BodyValidationErrors,
) -> Option<String> {
    match fields.get(field) {
        None => None,
        Some(Value::String(s)) => Some(s.clone()),
        Some(other) => {
            errors.add_field(field, format!("Expected string, received {}", type_name(other)));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
