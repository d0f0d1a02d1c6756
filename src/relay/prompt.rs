//! Inbound body parsing and prompt extraction.

use serde_json::Value;

use crate::relay::error::RelayError;

/// Decode `body` as JSON and pull out a non-empty string `prompt`.
///
/// Any JSON value is accepted at the parse step. A body that is not an
/// object, or whose `prompt` is absent or falsy (null, "", false, 0), is a
/// missing prompt; any other non-string `prompt` is rejected as such.
pub fn extract_prompt(body: &[u8]) -> Result<String, RelayError> {
    let value: Value = serde_json::from_slice(body).map_err(|_| RelayError::InvalidJson)?;

    match value.get("prompt") {
        Some(Value::String(prompt)) if !prompt.is_empty() => Ok(prompt.clone()),
        Some(prompt) if !is_falsy(prompt) => Err(RelayError::PromptNotString),
        _ => Err(RelayError::MissingPrompt),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
