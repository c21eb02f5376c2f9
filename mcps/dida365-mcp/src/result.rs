//! Tool result helpers
//!
//! Core failures are reported as error results (`is_error = true`) whose text
//! is the error message, so the calling agent can read and react to them.
//! Malformed tool arguments are protocol errors instead.

use dida365_core::Dida365Error;
use rmcp::{
    model::{CallToolResult, Content},
    ErrorData as McpError,
};
use serde::Serialize;

/// Pretty JSON success result
pub fn json_success<T: Serialize>(data: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(data)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

/// Text success result
pub fn text_success(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}

/// Error result carrying `message`
pub fn error_result(message: impl Into<String>) -> CallToolResult {
    CallToolResult::error(vec![Content::text(message.into())])
}

pub fn invalid_params(message: impl Into<String>) -> McpError {
    McpError::invalid_params(message.into(), None)
}

/// Render a core outcome, turning failures into error results
pub fn respond<T>(
    outcome: dida365_core::Result<T>,
    render: impl FnOnce(T) -> Result<CallToolResult, McpError>,
) -> Result<CallToolResult, McpError> {
    match outcome {
        Ok(value) => render(value),
        Err(e) => Ok(core_error(&e)),
    }
}

pub fn core_error(e: &Dida365Error) -> CallToolResult {
    tracing::warn!("tool call failed: {}", e);
    error_result(format!("Error: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestData {
        name: String,
        value: i32,
    }

    fn text_of(result: &CallToolResult) -> String {
        match &result.content[0].raw {
            rmcp::model::RawContent::Text(t) => t.text.clone(),
            _ => String::new(),
        }
    }

    #[test]
    fn test_json_success() {
        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        let result = json_success(&data).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert!(text_of(&result).contains("\"value\": 42"));
    }

    #[test]
    fn test_core_failure_is_error_result() {
        let result = respond::<()>(Err(Dida365Error::Unauthenticated), |_| {
            Ok(text_success("unreachable"))
        })
        .unwrap();
        assert_eq!(result.is_error, Some(true));
        assert!(text_of(&result).starts_with("Error: not authenticated"));
    }

    #[test]
    fn test_respond_renders_success() {
        let result = respond(Ok(3), |n| Ok(text_success(format!("{n} items")))).unwrap();
        assert!(!result.is_error.unwrap_or(false));
        assert_eq!(text_of(&result), "3 items");
    }
}
