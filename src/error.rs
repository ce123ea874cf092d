use thiserror::Error;

#[derive(Debug, Error)]
pub enum AskWebError {
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Search error: {0}")]
    SearchError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error: {0}")]
    NetworkError(#[source] reqwest::Error),

    #[error("Request timeout")]
    Timeout,

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl AskWebError {
    /// True when an upstream provider (LLM or search) could not serve the request.
    pub fn is_provider_unavailable(&self) -> bool {
        matches!(
            self,
            AskWebError::ApiError { .. }
                | AskWebError::SearchError(_)
                | AskWebError::NetworkError(_)
                | AskWebError::Timeout
        )
    }
}

impl From<reqwest::Error> for AskWebError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AskWebError::Timeout
        } else {
            AskWebError::NetworkError(err)
        }
    }
}

impl From<anyhow::Error> for AskWebError {
    fn from(err: anyhow::Error) -> Self {
        AskWebError::ConfigError(format!("{:#}", err))
    }
}

pub type Result<T> = std::result::Result<T, AskWebError>;
