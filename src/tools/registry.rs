use crate::error::AskWebError;
use crate::models::ToolDescriptor;
use futures::future::BoxFuture;
use jsonschema::{Draft, JSONSchema};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Why a tool call produced no result.
///
/// `UnknownTool` and `InvalidArguments` are the model's mistakes and get
/// reported back to it; `Failed` means the tool's backend broke.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Tool '{0}' not found")]
    UnknownTool(String),

    #[error("Invalid arguments for tool '{tool}': {reason}")]
    InvalidArguments { tool: String, reason: String },

    #[error(transparent)]
    Failed(#[from] AskWebError),
}

pub type ToolFuture = BoxFuture<'static, Result<String, ToolError>>;

type ToolHandler = Box<dyn Fn(Value) -> ToolFuture + Send + Sync>;

pub struct Tool {
    pub descriptor: ToolDescriptor,
    handler: ToolHandler,
}

impl Tool {
    pub fn new<F>(descriptor: ToolDescriptor, handler: F) -> Self
    where
        F: Fn(Value) -> ToolFuture + Send + Sync + 'static,
    {
        Self {
            descriptor,
            handler: Box::new(handler),
        }
    }

    pub fn name(&self) -> &str {
        &self.descriptor.name
    }
}

#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Tool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Tool) {
        self.tools.insert(tool.descriptor.name.clone(), tool);
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.get(name)
    }

    /// Registered tools ordered by name.
    pub fn list(&self) -> Vec<&Tool> {
        let mut tools: Vec<&Tool> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        tools
    }

    pub fn descriptors(&self) -> Vec<ToolDescriptor> {
        self.list()
            .into_iter()
            .map(|tool| tool.descriptor.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn validate_arguments(&self, tool_name: &str, arguments: &Value) -> Result<(), ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        let invalid = |reason: String| ToolError::InvalidArguments {
            tool: tool_name.to_string(),
            reason,
        };

        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&tool.descriptor.parameters)
            .map_err(|e| invalid(format!("Invalid tool schema: {}", e)))?;

        if let Err(errors) = schema.validate(arguments) {
            let error_messages: Vec<String> = errors
                .map(|e| format!("{}: {}", e.instance_path, e))
                .collect();
            return Err(invalid(error_messages.join("; ")));
        }

        Ok(())
    }

    /// Parse the raw argument payload, validate it and run the named tool.
    pub async fn call(&self, tool_name: &str, arguments: &str) -> Result<String, ToolError> {
        let tool = self
            .tools
            .get(tool_name)
            .ok_or_else(|| ToolError::UnknownTool(tool_name.to_string()))?;

        // Some providers send an empty string for argument-less calls.
        let arguments: Value = if arguments.trim().is_empty() {
            Value::Object(Default::default())
        } else {
            serde_json::from_str(arguments).map_err(|e| ToolError::InvalidArguments {
                tool: tool_name.to_string(),
                reason: format!("failed to parse arguments: {}", e),
            })?
        };

        self.validate_arguments(tool_name, &arguments)?;

        (tool.handler)(arguments).await
    }
}
