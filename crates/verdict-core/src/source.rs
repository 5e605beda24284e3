//! Errors that can be turned into a response

use std::collections::BTreeMap;
use std::fmt;
use std::panic::Location;

use serde_json::Value;

/// Message used when a responder is built without an error
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error";

/// An error as seen by a responder
///
/// Only [`message`](Self::message) is required. The responder asks for the
/// field named by the configured `error_code_key` to discover the error
/// code, and for [`stack`](Self::stack) when the current environment is
/// allowed to expose it.
pub trait ErrorSource: Send + Sync {
    /// Human-readable message sent to the client
    fn message(&self) -> String;

    /// Value of a named field, if the error carries one
    ///
    /// Empty values are treated as absent by the responder.
    fn field(&self, name: &str) -> Option<String> {
        let _ = name;
        None
    }

    /// Stack trace or cause chain
    fn stack(&self) -> Option<String> {
        None
    }
}

/// General-purpose application error with named string fields
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    message: String,
    fields: BTreeMap<String, String>,
    stack: Option<String>,
}

impl AppError {
    /// Create an error, recording where it was created as its stack
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let stack = capture_stack(&message, Location::caller());

        Self {
            message,
            fields: BTreeMap::new(),
            stack: Some(stack),
        }
    }

    /// The error substituted when none is supplied
    #[track_caller]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_ERROR_MESSAGE)
    }

    /// Attach a field, typically the error code
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Shorthand for `with_field("code", code)`
    #[must_use]
    pub fn with_code(self, code: impl Into<String>) -> Self {
        self.with_field("code", code)
    }

    /// Replace the recorded stack
    #[must_use]
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

impl ErrorSource for AppError {
    fn message(&self) -> String {
        self.message.clone()
    }

    fn field(&self, name: &str) -> Option<String> {
        self.fields.get(name).cloned()
    }

    fn stack(&self) -> Option<String> {
        self.stack.clone()
    }
}

/// Error documents such as `{"message": "boom", "code": "VALIDATION"}`
///
/// A bare JSON string is used as the message. Field values that are
/// `null`, `false`, `0` or `""` count as absent; other non-string values
/// are rendered as JSON text.
impl ErrorSource for Value {
    fn message(&self) -> String {
        match self {
            Self::String(message) => message.clone(),
            Self::Object(map) => map.get("message").map(text).unwrap_or_default(),
            _ => String::new(),
        }
    }

    fn field(&self, name: &str) -> Option<String> {
        self.get(name).and_then(present_text)
    }

    fn stack(&self) -> Option<String> {
        self.get("stack").and_then(present_text)
    }
}

/// Fields come from the first [`AppError`] in the chain
impl ErrorSource for anyhow::Error {
    fn message(&self) -> String {
        self.to_string()
    }

    fn field(&self, name: &str) -> Option<String> {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<AppError>())
            .and_then(|error| error.field(name))
    }

    fn stack(&self) -> Option<String> {
        Some(format!("{self:?}"))
    }
}

/// Render an error and its sources, one cause per line
pub fn cause_chain(error: &(dyn std::error::Error + 'static)) -> String {
    std::iter::successors(Some(error), |current| current.source())
        .enumerate()
        .map(|(depth, cause)| {
            if depth == 0 {
                cause.to_string()
            } else {
                format!("    caused by: {cause}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn capture_stack(message: &str, location: &Location<'_>) -> String {
    let backtrace = std::backtrace::Backtrace::capture();
    let mut stack = format!("Error: {message}\n    at {location}");

    if backtrace.status() == std::backtrace::BacktraceStatus::Captured {
        stack.push('\n');
        stack.push_str(&backtrace.to_string());
    }

    stack
}

fn text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// `null`, `false`, `0` and `""` are falsy; everything else is present
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null | Value::Bool(false) => false,
        Value::String(text) => !text.is_empty(),
        Value::Number(number) => number.as_f64().is_none_or(|n| n != 0.0),
        _ => true,
    }
}

fn present_text(value: &Value) -> Option<String> {
    is_present(value).then(|| text(value))
}
