use super::types::{FormData, FormField, FormFieldKind, Task};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Field id -> message, ordered by field id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormValidationErrors(pub BTreeMap<String, String>);

impl FormValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field_id: &str) -> Option<&str> {
        self.0.get(field_id).map(String::as_str)
    }

    fn insert(&mut self, field_id: &str, message: String) {
        self.0.entry(field_id.to_string()).or_insert(message);
    }
}

impl fmt::Display for FormValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Whether a value counts as filled in.
pub fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(Value::Number(_)) => true,
        Some(Value::Array(items)) => !items.is_empty(),
        Some(Value::Object(map)) => !map.is_empty(),
        Some(Value::Bool(b)) => *b,
    }
}

fn is_numeric(value: &Value) -> bool {
    match value {
        Value::Number(_) => true,
        Value::String(s) => s.trim().parse::<f64>().is_ok(),
        _ => false,
    }
}

fn photo_refs(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(usize::from(!s.trim().is_empty())),
        Value::Array(items) => items
            .iter()
            .map(|v| v.as_str().map(|s| !s.trim().is_empty()))
            .try_fold(0usize, |n, ok| ok.map(|ok| n + usize::from(ok))),
        _ => None,
    }
}

fn check_kind(field: &FormField, value: &Value) -> Option<String> {
    match field.kind {
        FormFieldKind::Text if !value.is_string() => Some("Must be text".to_string()),
        FormFieldKind::Number if !is_numeric(value) => Some("Must be a number".to_string()),
        FormFieldKind::Checkbox if !value.is_boolean() => {
            Some("Must be true or false".to_string())
        }
        FormFieldKind::Photo if photo_refs(value).is_none() => {
            Some("Must be a photo reference".to_string())
        }
        FormFieldKind::Select => match &field.options {
            Some(options) if !options.is_empty() => {
                let chosen = value.as_str();
                if chosen.is_some_and(|c| options.iter().any(|o| o == c)) {
                    None
                } else {
                    Some(format!("Must be one of: {}", options.join(", ")))
                }
            }
            _ => None,
        },
        _ => None,
    }
}

/// Check submitted data against the field definitions of a form.
pub fn validate_form(fields: &[FormField], data: &FormData) -> Result<(), FormValidationErrors> {
    let mut errors = FormValidationErrors::default();
    for field in fields {
        let value = data.get(&field.id);
        if !is_present(value) {
            if field.required {
                errors.insert(&field.id, REQUIRED_MESSAGE.to_string());
            }
            continue;
        }
        if let Some(message) = value.and_then(|v| check_kind(field, v)) {
            errors.insert(&field.id, message);
        }
    }
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Form validation plus the task's required photo count.
pub fn validate_task_submission(task: &Task, data: &FormData) -> Result<(), FormValidationErrors> {
    let mut errors = match validate_form(&task.form_fields, data) {
        Ok(()) => FormValidationErrors::default(),
        Err(e) => e,
    };

    let photos: usize = task
        .form_fields
        .iter()
        .filter(|f| f.kind == FormFieldKind::Photo)
        .filter_map(|f| data.get(&f.id))
        .filter_map(photo_refs)
        .sum();
    if photos < task.required_photos as usize {
        errors.insert(
            "photos",
            format!(
                "At least {} photo(s) required, got {}",
                task.required_photos, photos
            ),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
