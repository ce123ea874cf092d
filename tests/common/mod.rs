#![allow(dead_code)]

use askweb::api::LlmClient;
use askweb::config::ToolsSettings;
use askweb::error::{AskWebError, Result};
use askweb::models::{Message, ToolCall, ToolDescriptor};
use askweb::orchestrator::Orchestrator;
use askweb::search::{SearchAdapter, SearchProvider, DEFAULT_MAX_RESULTS};
use askweb::tools::build_registry;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<Message>,
    pub tools: Vec<String>,
}

/// Answers completions from a fixed script and records every request.
pub struct ScriptedLlm {
    responses: Mutex<VecDeque<Result<Message>>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedLlm {
    pub fn new(responses: Vec<Result<Message>>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, messages: &[Message], tools: &[ToolDescriptor]) -> Result<Message> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            tools: tools.iter().map(|t| t.name.clone()).collect(),
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AskWebError::MalformedResponse("no scripted response left".to_string())))
    }
}

/// Returns the same records for every query.
pub struct StaticSearch {
    records: Vec<Value>,
    queries: Mutex<Vec<String>>,
}

impl StaticSearch {
    pub fn new(records: Vec<Value>) -> Arc<Self> {
        Arc::new(Self {
            records,
            queries: Mutex::new(Vec::new()),
        })
    }

    pub fn with_results(count: usize) -> Arc<Self> {
        Self::new(
            (0..count)
                .map(|i| {
                    json!({
                        "title": format!("Result {}", i),
                        "href": format!("https://example.com/{}", i),
                        "body": format!("Tokyo weather result {}", i),
                    })
                })
                .collect(),
        )
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }
}

#[async_trait]
impl SearchProvider for StaticSearch {
    async fn text(&self, query: &str, _max_results: usize) -> Result<Vec<Value>> {
        self.queries.lock().unwrap().push(query.to_string());
        Ok(self.records.clone())
    }
}

/// Always fails like an unreachable provider.
pub struct FailingSearch;

#[async_trait]
impl SearchProvider for FailingSearch {
    async fn text(&self, _query: &str, _max_results: usize) -> Result<Vec<Value>> {
        Err(AskWebError::SearchError("network unreachable".to_string()))
    }
}

pub fn search_adapter(provider: Arc<dyn SearchProvider>) -> Arc<SearchAdapter> {
    Arc::new(SearchAdapter::new(provider, DEFAULT_MAX_RESULTS))
}

pub fn orchestrator(llm: Arc<ScriptedLlm>, provider: Arc<dyn SearchProvider>) -> Orchestrator {
    let registry = build_registry(&ToolsSettings::default(), search_adapter(provider));
    Orchestrator::new(llm, Arc::new(registry))
}

pub fn answer(text: &str) -> Result<Message> {
    Ok(Message::assistant(Some(text.to_string()), None))
}

pub fn calls(tool_calls: Vec<ToolCall>) -> Result<Message> {
    Ok(Message::assistant(None, Some(tool_calls)))
}

pub fn search_call(id: &str, query: &str) -> ToolCall {
    ToolCall::function(id, "search_duckduckgo", json!({ "query": query }).to_string())
}
