pub const DEFAULT_API_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_BIND: &str = "127.0.0.1:8000";

pub fn default_request_timeout() -> u64 {
    60
}

pub fn default_tools_enabled() -> bool {
    true
}

pub fn default_max_tool_rounds() -> usize {
    1
}

pub fn default_search_max_results() -> usize {
    crate::search::DEFAULT_MAX_RESULTS
}
