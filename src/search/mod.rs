mod duckduckgo;

pub use duckduckgo::{parse_results, DuckDuckGo};

use crate::error::Result;
use crate::models::{ToolDescriptor, ToolResult};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

pub const SEARCH_TOOL_NAME: &str = "search_duckduckgo";
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// A web-search backend returning its own record shape.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn text(&self, query: &str, max_results: usize) -> Result<Vec<Value>>;
}

pub struct SearchAdapter {
    provider: Arc<dyn SearchProvider>,
    max_results: usize,
}

impl SearchAdapter {
    /// `max_results` is capped at [`DEFAULT_MAX_RESULTS`].
    pub fn new(provider: Arc<dyn SearchProvider>, max_results: usize) -> Self {
        Self {
            provider,
            max_results: max_results.min(DEFAULT_MAX_RESULTS),
        }
    }

    pub async fn search(&self, query: &str) -> Result<Vec<ToolResult>> {
        let records = self.provider.text(query, self.max_results).await?;
        tracing::debug!(query, results = records.len(), "search completed");

        Ok(records
            .iter()
            .take(self.max_results)
            .map(normalize_result)
            .collect())
    }

    pub fn descriptor() -> ToolDescriptor {
        ToolDescriptor {
            name: SEARCH_TOOL_NAME.to_string(),
            description: "Perform a web search using DuckDuckGo.".to_string(),
            parameters: json!({
                "type": "object",
                "properties": {
                    "query": {
                        "type": "string",
                        "description": "The search query to look up online."
                    }
                },
                "required": ["query"]
            }),
        }
    }
}

fn text_field<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record
        .get(key)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
}

/// Normalize one provider record. Content prefers `body`, then `snippet`,
/// then the raw record itself.
pub fn normalize_result(record: &Value) -> ToolResult {
    let content = text_field(record, "body")
        .or_else(|| text_field(record, "snippet"))
        .map(|s| s.to_string())
        .unwrap_or_else(|| record.to_string());

    ToolResult {
        content,
        title: text_field(record, "title").map(|s| s.to_string()),
        url: text_field(record, "href")
            .or_else(|| text_field(record, "url"))
            .map(|s| s.to_string()),
    }
}
