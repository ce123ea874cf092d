use super::registry::{Tool, ToolError, ToolRegistry};
use crate::config::ToolsSettings;
use crate::models::ToolDescriptor;
use crate::search::{SearchAdapter, SEARCH_TOOL_NAME};
use futures::FutureExt;
use serde_json::{json, Value};
use std::sync::Arc;

pub const TIME_NOW_TOOL_NAME: &str = "time_now";

/// Build the registry of tools offered to the model, honoring the tool settings.
pub fn build_registry(settings: &ToolsSettings, search: Arc<SearchAdapter>) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    if !settings.enabled {
        return registry;
    }

    let is_enabled = |name: &str| !settings.disabled.iter().any(|d| d == name);

    if is_enabled(SEARCH_TOOL_NAME) {
        registry.register(search_tool(search));
    }
    if is_enabled(TIME_NOW_TOOL_NAME) {
        registry.register(time_now_tool());
    }

    registry
}

pub fn search_tool(adapter: Arc<SearchAdapter>) -> Tool {
    Tool::new(SearchAdapter::descriptor(), move |args| {
        let adapter = Arc::clone(&adapter);
        async move { handle_search(&adapter, &args).await }.boxed()
    })
}

pub fn time_now_tool() -> Tool {
    Tool::new(
        ToolDescriptor {
            name: TIME_NOW_TOOL_NAME.to_string(),
            description: "Get the current date and time in ISO-8601 format.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {},
                "additionalProperties": false
            }),
        },
        |args| async move { handle_time_now(&args) }.boxed(),
    )
}

// Tool handlers

pub async fn handle_search(adapter: &SearchAdapter, args: &Value) -> Result<String, ToolError> {
    let query = args
        .get("query")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ToolError::InvalidArguments {
            tool: SEARCH_TOOL_NAME.to_string(),
            reason: "Missing required argument: query".to_string(),
        })?;

    let results = adapter.search(query).await?;
    serde_json::to_string(&results).map_err(|e| ToolError::Failed(e.into()))
}

pub fn handle_time_now(_args: &Value) -> Result<String, ToolError> {
    Ok(chrono::Utc::now().to_rfc3339())
}
