use crate::api::response::assistant_message;
use crate::api::RequestBody;
use crate::error::{AskWebError, Result};
use crate::models::{Message, ToolDescriptor};
use crate::tools::format_tools_for_llm;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

/// A chat-completion backend. Given the ordered conversation and the tools on
/// offer, it answers with one assistant message.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, messages: &[Message], tools: &[ToolDescriptor]) -> Result<Message>;
}

pub async fn make_api_request(
    http: &reqwest::Client,
    api_key: &str,
    api_endpoint: &str,
    request_body: &RequestBody,
) -> Result<reqwest::Response> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))
            .map_err(|e| AskWebError::ConfigError(format!("Invalid authorization header: {}", e)))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    let response = http
        .post(api_endpoint)
        .headers(headers)
        .json(request_body)
        .send()
        .await?;
    Ok(response)
}

/// Client for any OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    api_endpoint: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(
        http: reqwest::Client,
        api_key: impl Into<String>,
        api_endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            http,
            api_key: api_key.into(),
            api_endpoint: api_endpoint.into(),
            model: model.into(),
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[Message], tools: &[ToolDescriptor]) -> Result<Message> {
        let request_body = RequestBody {
            model: self.model.clone(),
            messages: messages.to_vec(),
            stream: false,
            tools: if tools.is_empty() {
                None
            } else {
                Some(format_tools_for_llm(tools))
            },
        };

        tracing::debug!(
            model = %self.model,
            messages = request_body.messages.len(),
            tools = tools.len(),
            "making completion request"
        );

        let response =
            make_api_request(&self.http, &self.api_key, &self.api_endpoint, &request_body).await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AskWebError::ApiError {
                status,
                message: error_text,
            });
        }

        let response_text = response.text().await?;
        tracing::debug!(raw = %response_text, "completion response");

        let response_json: Value = serde_json::from_str(&response_text).map_err(|e| {
            AskWebError::MalformedResponse(format!("Response is not valid JSON: {}", e))
        })?;

        assistant_message(&response_json)
    }
}
