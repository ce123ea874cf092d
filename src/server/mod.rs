mod handlers;

pub use handlers::{ChatForm, ChatResponse};

use crate::error::AskWebError;
use crate::orchestrator::Orchestrator;
use crate::session::SessionStore;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator>,
    pub sessions: Arc<dyn SessionStore>,
}

impl AppState {
    pub fn new(orchestrator: Arc<Orchestrator>, sessions: Arc<dyn SessionStore>) -> Self {
        Self {
            orchestrator,
            sessions,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/chat", post(handlers::chat))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

impl IntoResponse for AskWebError {
    fn into_response(self) -> Response {
        let status = if self.is_provider_unavailable() {
            StatusCode::BAD_GATEWAY
        } else if matches!(self, AskWebError::InvalidRequest(_)) {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        (status, self.to_string()).into_response()
    }
}
