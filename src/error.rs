//! Structured error types for the JSON and CLI surfaces.
//!
//! The layout pass itself never fails; these only cover reading requests and
//! writing results.

use thiserror::Error;

/// The unified error type returned by the public fallible entry points.
#[derive(Debug, Error)]
pub enum PagedError {
    /// JSON input failed to parse as a valid layout request.
    #[error("Failed to parse layout request: {source}{}", hint_suffix(.hint))]
    ParseError {
        #[source]
        source: serde_json::Error,
        hint: String,
    },
    /// A layout snapshot could not be written as JSON.
    #[error("Failed to serialize layout: {0}")]
    SerializeError(#[source] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &str) -> String {
    if hint.is_empty() {
        String::new()
    } else {
        format!("\n  Hint: {}", hint)
    }
}

impl From<serde_json::Error> for PagedError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "Check for trailing commas, missing quotes, or unescaped characters.".to_string()
            }
            serde_json::error::Category::Data => {
                "The JSON is valid but doesn't match the layout request schema. Check field names and types.".to_string()
            }
            serde_json::error::Category::Eof => {
                "Unexpected end of input. Is the JSON truncated?".to_string()
            }
            serde_json::error::Category::Io => String::new(),
        };
        PagedError::ParseError { source: e, hint }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_errors_carry_a_hint() {
        let err: PagedError = serde_json::from_str::<serde_json::Value>("{ \"a\": 1, }")
            .unwrap_err()
            .into();
        let message = err.to_string();
        assert!(message.starts_with("Failed to parse layout request"));
        assert!(message.contains("Hint: Check for trailing commas"));
    }

    #[test]
    fn truncated_input_hint() {
        let err: PagedError = serde_json::from_str::<serde_json::Value>("{ \"a\": ")
            .unwrap_err()
            .into();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn parse_error_exposes_its_source() {
        use std::error::Error;
        let err: PagedError = serde_json::from_str::<serde_json::Value>("nope")
            .unwrap_err()
            .into();
        assert!(err.source().is_some());
    }
}
