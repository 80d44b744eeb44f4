use serde::{Deserialize, Serialize};

/// A scalar value recorded for one form field.
///
/// Untagged so stored documents stay plain JSON: checkboxes serialize as
/// booleans, every other control as its raw string. Numbers and anything else
/// a newer sheet wrote are kept rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Flag(bool),
    Number(serde_json::Number),
    Text(String),
    Other(serde_json::Value),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Number(value) => value.as_i64(),
            FieldValue::Text(value) => value.trim().parse().ok(),
            _ => None,
        }
    }

    /// Checkbox coercion: `true`, non-empty strings and nonzero numbers check the box.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Flag(value) => *value,
            FieldValue::Number(value) => value.as_f64().is_some_and(|n| n != 0.0),
            FieldValue::Text(value) => !value.is_empty(),
            FieldValue::Other(value) => !(value.is_null()
                || value.as_bool() == Some(false)),
        }
    }

    /// The string a text control shows when given this value.
    pub fn to_display_string(&self) -> String {
        match self {
            FieldValue::Flag(value) => value.to_string(),
            FieldValue::Number(value) => value.to_string(),
            FieldValue::Text(value) => value.clone(),
            FieldValue::Other(serde_json::Value::Null) => String::new(),
            FieldValue::Other(value) => value.to_string(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}
