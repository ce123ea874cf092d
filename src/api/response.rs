use crate::error::{AskWebError, Result};
use crate::models::{Message, ToolCall};
use serde_json::Value;

fn first_message(response_json: &Value) -> Result<&Value> {
    let choices = response_json
        .get("choices")
        .and_then(|c| c.as_array())
        .ok_or_else(|| AskWebError::MalformedResponse("No choices in response".to_string()))?;

    let first_choice = choices
        .first()
        .ok_or_else(|| AskWebError::MalformedResponse("Empty choices array".to_string()))?;

    first_choice
        .get("message")
        .ok_or_else(|| AskWebError::MalformedResponse("No message in response".to_string()))
}

/// Parse the tool calls requested by the first choice, if any.
pub fn parse_tool_calls(response_json: &Value) -> Result<Option<Vec<ToolCall>>> {
    let message = first_message(response_json)?;

    match message.get("tool_calls") {
        Some(Value::Array(calls)) if !calls.is_empty() => {
            let calls: Vec<ToolCall> = serde_json::from_value(Value::Array(calls.clone()))
                .map_err(|e| AskWebError::MalformedResponse(format!("Invalid tool_calls: {}", e)))?;
            Ok(Some(calls))
        }
        _ => Ok(None),
    }
}

/// Extract content from a completion response
pub fn extract_content(response_json: &Value) -> Result<Option<String>> {
    let message = first_message(response_json)?;

    Ok(message
        .get("content")
        .and_then(|c| c.as_str())
        .map(|s| s.to_string()))
}

/// Build the assistant message carried by a completion response.
pub fn assistant_message(response_json: &Value) -> Result<Message> {
    let content = extract_content(response_json)?;
    let tool_calls = parse_tool_calls(response_json)?;
    Ok(Message::assistant(content, tool_calls))
}
