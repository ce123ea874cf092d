use super::AppState;
use crate::error::{AskWebError, Result};
use axum::extract::State;
use axum::{Form, Json};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Deserialize)]
pub struct ChatForm {
    pub query: String,
    #[serde(default)]
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
}

pub async fn index() -> Json<Value> {
    Json(json!({ "message": "hello world" }))
}

pub async fn chat(State(state): State<AppState>, Form(form): Form<ChatForm>) -> Result<Json<ChatResponse>> {
    if form.query.trim().is_empty() {
        return Err(AskWebError::InvalidRequest("query must not be empty".to_string()));
    }

    // HTML forms submit an empty field rather than omitting it.
    let requested_id = form
        .session_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let (session_id, handle) = state.sessions.resolve(requested_id);
    let mut session = handle.lock().await;

    let response = state
        .orchestrator
        .run(&form.query, &mut session.messages)
        .await;
    session.touch();
    let response = response?;

    tracing::debug!(
        session_id = %session_id,
        history = session.messages.len(),
        "chat turn completed"
    );

    Ok(Json(ChatResponse {
        response,
        session_id,
    }))
}
