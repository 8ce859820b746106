//! Outbound message payloads.
//!
//! Payloads arrive dynamically typed. Only JSON strings are sendable; arrays,
//! objects, booleans, numbers and null are rejected rather than stringified.

use crate::Endpoint;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a JSON value's kind, for error messages.
pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Borrow the text of a sendable message.
pub fn message_text(value: &Value) -> Result<&str, MessageError> {
    value
        .as_str()
        .ok_or_else(|| MessageError::NotText(kind_of(value)))
}

/// Whether `value` is a sendable message.
pub fn validate_message(value: &Value) -> bool {
    value.is_string()
}

/// The most recently accepted message and its destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSend {
    pub message: String,
    pub endpoint: Endpoint,
}

impl PendingSend {
    pub fn new(message: impl Into<String>, endpoint: Endpoint) -> Self {
        Self {
            message: message.into(),
            endpoint,
        }
    }
}

/// Error validating a message payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MessageError {
    #[error("message must be text, got {0}")]
    NotText(&'static str),
}
