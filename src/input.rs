//! Request parsing for the command line tool.

use serde_json::Value;
use thiserror::Error;

/// Errors that can occur when parsing a request.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("missing required field: {0}")]
    MissingField(&'static str),
}

/// A command line to split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitRequest {
    /// The command line text.
    pub command: String,
    /// Profile name (optional).
    pub profile: Option<String>,
    /// Directory to look for a project config in (optional).
    pub cwd: Option<String>,
}

impl SplitRequest {
    /// Parse a JSON request object.
    pub fn parse(json: &str) -> Result<Self, InputError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Read a request from stdin contents. A JSON object is parsed as a
    /// request; anything else is taken as the raw command line.
    pub fn from_stdin(text: &str) -> Result<Self, InputError> {
        match serde_json::from_str::<Value>(text) {
            Ok(value) if value.is_object() => Self::from_value(&value),
            _ => Ok(Self {
                command: strip_newline(text).to_string(),
                profile: None,
                cwd: None,
            }),
        }
    }

    fn from_value(value: &Value) -> Result<Self, InputError> {
        let command = value
            .get("command")
            .and_then(Value::as_str)
            .ok_or(InputError::MissingField("command"))?
            .to_string();
        let field = |name: &str| value.get(name).and_then(Value::as_str).map(String::from);
        Ok(Self {
            command,
            profile: field("profile"),
            cwd: field("cwd"),
        })
    }
}

fn strip_newline(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}
