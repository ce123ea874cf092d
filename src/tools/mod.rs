pub mod builtins;
mod registry;

pub use builtins::build_registry;
pub use registry::{Tool, ToolError, ToolFuture, ToolRegistry};

use crate::models::ToolDescriptor;
use serde_json::{json, Value};

pub fn format_tools_for_llm(tools: &[ToolDescriptor]) -> Vec<Value> {
    tools
        .iter()
        .map(|tool| {
            json!({
                "type": "function",
                "function": {
                    "name": tool.name,
                    "description": tool.description,
                    "parameters": tool.parameters,
                }
            })
        })
        .collect()
}
