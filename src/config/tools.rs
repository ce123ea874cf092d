use serde::{Deserialize, Serialize};

use crate::config::defaults::{
    default_max_tool_rounds, default_search_max_results, default_tools_enabled,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    #[serde(default = "default_tools_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub max_rounds: Option<usize>,
    #[serde(default)]
    pub disabled: Vec<String>,
    #[serde(default)]
    pub search: SearchConfig,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            enabled: default_tools_enabled(),
            max_rounds: None,
            disabled: Vec::new(),
            search: SearchConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_search_max_results")]
    pub max_results: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            max_results: default_search_max_results(),
        }
    }
}

/// Resolved tool settings.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolsSettings {
    pub enabled: bool,
    pub max_rounds: usize,
    pub disabled: Vec<String>,
    pub search: SearchSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub endpoint: String,
    pub max_results: usize,
}

impl Default for ToolsSettings {
    fn default() -> Self {
        Self {
            enabled: default_tools_enabled(),
            max_rounds: default_max_tool_rounds(),
            disabled: Vec::new(),
            search: SearchSettings {
                endpoint: crate::search::DuckDuckGo::DEFAULT_ENDPOINT.to_string(),
                max_results: default_search_max_results(),
            },
        }
    }
}
