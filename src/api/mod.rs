pub mod client;
pub mod models;
pub mod response;

pub use client::{make_api_request, LlmClient, OpenAiClient};
pub use models::RequestBody;
