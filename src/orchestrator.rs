use crate::api::LlmClient;
use crate::config::Config;
use crate::error::Result;
use crate::models::{Message, Role, ToolCall};
use crate::tools::{ToolError, ToolRegistry};
use std::sync::Arc;

/// Drives one user turn: the first completion, up to `max_tool_rounds` rounds of
/// tool execution, and the final answer. All messages are appended to the
/// caller's history in the order they are exchanged.
pub struct Orchestrator {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: Option<String>,
    max_tool_rounds: usize,
}

impl Orchestrator {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            llm,
            tools,
            system_prompt: None,
            max_tool_rounds: 1,
        }
    }

    pub fn with_system_prompt(mut self, system_prompt: Option<String>) -> Self {
        self.system_prompt = system_prompt;
        self
    }

    pub fn with_max_tool_rounds(mut self, max_tool_rounds: usize) -> Self {
        self.max_tool_rounds = max_tool_rounds;
        self
    }

    fn system_message(&self) -> Message {
        let date_prompt = format!("Today's date is {}.", Config::get_current_date());
        match &self.system_prompt {
            Some(prompt) => Message::system(format!("{}\n\n{}", date_prompt, prompt)),
            None => Message::system(date_prompt),
        }
    }

    /// The system prompt is sent with every request but never stored in the history.
    /// Calls left unanswered by an aborted turn get a placeholder tool message in the
    /// request only, so the provider still accepts the replayed history.
    fn request_messages(&self, history: &[Message]) -> Vec<Message> {
        let mut request = Vec::with_capacity(history.len() + 1);
        request.push(self.system_message());

        let mut pending: Vec<&str> = Vec::new();
        for message in history {
            if message.role != Role::Tool {
                close_pending(&mut request, &mut pending);
            }
            if let Some(id) = message.tool_call_id.as_deref() {
                pending.retain(|pending_id| *pending_id != id);
            }
            request.push(message.clone());
            pending.extend(message.requested_tool_calls().iter().map(|c| c.id.as_str()));
        }
        close_pending(&mut request, &mut pending);

        request
    }

    pub async fn run(&self, query: &str, messages: &mut Vec<Message>) -> Result<String> {
        let tools = self.tools.descriptors();
        messages.push(Message::user(query));

        let mut rounds = 0;
        loop {
            let response = self
                .llm
                .complete(&self.request_messages(messages), &tools)
                .await?;

            let tool_calls = response.requested_tool_calls().to_vec();
            if tool_calls.is_empty() || rounds >= self.max_tool_rounds {
                if !tool_calls.is_empty() {
                    tracing::debug!(
                        ignored = tool_calls.len(),
                        max_tool_rounds = self.max_tool_rounds,
                        "tool round limit reached, ignoring tool calls"
                    );
                }

                // A stored assistant message without tool calls always carries content.
                let content = response.content.unwrap_or_default();
                messages.push(Message::assistant(Some(content.clone()), None));
                return Ok(content);
            }

            rounds += 1;
            tracing::debug!(round = rounds, calls = tool_calls.len(), "executing tools");

            messages.push(response);
            for tool_call in &tool_calls {
                let result = self.execute_tool_call(tool_call).await?;
                messages.push(result);
            }
        }
    }

    /// Run one requested call. Unknown tools and bad arguments come back as a
    /// tool message for the model; backend failures abort the turn.
    async fn execute_tool_call(&self, tool_call: &ToolCall) -> Result<Message> {
        let name = tool_call.function.name.as_str();
        tracing::info!(tool = name, call_id = %tool_call.id, "calling tool");

        match self.tools.call(name, &tool_call.function.arguments).await {
            Ok(result_text) => Ok(Message::tool(&tool_call.id, result_text)),
            Err(ToolError::Failed(err)) => {
                tracing::error!(tool = name, error = %err, "tool execution failed");
                Err(err)
            }
            Err(err) => {
                tracing::warn!(tool = name, error = %err, "reporting tool error to the model");
                Ok(Message::tool(&tool_call.id, format!("Error: {}", err)))
            }
        }
    }
}

const INTERRUPTED_TOOL_CALL: &str = "Error: tool call was interrupted";

fn close_pending(request: &mut Vec<Message>, pending: &mut Vec<&str>) {
    for id in pending.drain(..) {
        request.push(Message::tool(id, INTERRUPTED_TOOL_CALL));
    }
}
