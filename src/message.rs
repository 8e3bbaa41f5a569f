//! The variadic message value model.
//!
//! A logging call takes a sequence of heterogeneous values: plain text,
//! composite data, or error-like values carrying a stack. `Message` is the
//! typed form of that sequence.

use serde_json::Value;

/// One argument of a logging call.
#[derive(Clone, Debug, PartialEq)]
pub enum Message {
    /// Plain text, rendered as-is.
    Text(String),
    /// A composite value, serialized pretty (normal) or compact.
    Data(Value),
    /// An error-like value: a message plus an optional captured stack.
    Failure {
        message: String,
        stack: Option<String>,
    },
}

impl Message {
    /// Wrap a standard error. No stack text is attached; the resolver will
    /// synthesize one at render time.
    pub fn from_error(err: &dyn std::error::Error) -> Self {
        Self::Failure {
            message: err.to_string(),
            stack: None,
        }
    }

    /// Wrap an error-like value with an explicit stack text.
    pub fn failure(message: impl Into<String>, stack: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
            stack: Some(stack.into()),
        }
    }

    /// The value's natural text form, used by raw mode: strings unquoted,
    /// composite values in compact form, failures by message alone.
    pub fn natural_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Data(Value::String(text)) => text.clone(),
            Self::Data(value) => value.to_string(),
            Self::Failure { message, .. } => message.clone(),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::String(text) => Self::Text(text),
            other => Self::Data(other),
        }
    }
}
