mod api;
mod defaults;
mod tools;
mod validation;

use crate::cli::Args;
use crate::error::{AskWebError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub use api::{normalize_endpoint, ApiConfig};
pub use defaults::{DEFAULT_API_ENDPOINT, DEFAULT_BIND, DEFAULT_MODEL};
pub use tools::{SearchConfig, SearchSettings, ToolsConfig, ToolsSettings};
pub use validation::{expand_env_var_in_string, parse_flag};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub verbose: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ModelConfig {
    #[serde(default)]
    pub default_model: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub bind: Option<String>,
}

/// On-disk configuration, YAML or JSON.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FileConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_endpoint: String,
    pub model: String,
    pub system_prompt: Option<String>,
    pub request_timeout: u64,
    pub bind: String,
    pub verbose: bool,
    pub tools: ToolsSettings,
}

impl Config {
    pub fn from_env_and_args(args: &Args) -> Result<Self> {
        let file_config = match &args.config {
            Some(path) => FileConfig::load_from(path)?,
            None => FileConfig::load()?,
        };
        Self::from_sources(args, &file_config, |key| env::var(key).ok())
    }

    /// Resolve every setting with precedence CLI args > environment > config file > default.
    pub fn from_sources<F>(args: &Args, file_config: &FileConfig, env_lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Get API key (still required from env var for security)
        let api_key = env_lookup("OPENAI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                AskWebError::ConfigError("OPENAI_API_KEY environment variable not set".to_string())
            })?;

        let api_endpoint = args
            .api_endpoint
            .clone()
            .or_else(|| env_lookup("ASKWEB_API_ENDPOINT"))
            .or_else(|| file_config.api.endpoint.clone())
            .map(|endpoint| normalize_endpoint(&expand_env_var_in_string(&endpoint, &env_lookup)))
            .unwrap_or_else(|| DEFAULT_API_ENDPOINT.to_string());

        let model = args
            .model
            .clone()
            .or_else(|| env_lookup("ASKWEB_MODEL"))
            .or_else(|| file_config.model.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let system_prompt = env_lookup("ASKWEB_SYSTEM_PROMPT")
            .or_else(|| file_config.model.system_prompt.clone())
            .filter(|prompt| !prompt.trim().is_empty());

        let request_timeout = parse_env::<u64>(&env_lookup, "ASKWEB_REQUEST_TIMEOUT")?
            .or(file_config.api.request_timeout)
            .unwrap_or_else(defaults::default_request_timeout);
        if request_timeout == 0 {
            return Err(AskWebError::ConfigError(
                "request timeout must be at least 1 second".to_string(),
            ));
        }

        let bind = args
            .bind
            .clone()
            .or_else(|| env_lookup("ASKWEB_BIND"))
            .or_else(|| file_config.server.bind.clone())
            .unwrap_or_else(|| DEFAULT_BIND.to_string());

        let verbose = args.verbose
            || env_lookup("ASKWEB_VERBOSE")
                .map(|v| parse_flag(&v))
                .or(file_config.session.verbose)
                .unwrap_or(false);

        // --no-tools wins over everything else
        let tools_enabled = if args.no_tools {
            false
        } else {
            match env_lookup("ASKWEB_TOOLS_ENABLED") {
                Some(v) => parse_flag(&v),
                None => file_config.tools.enabled,
            }
        };

        let max_rounds = match args.max_tool_rounds {
            Some(rounds) => rounds,
            None => parse_env::<usize>(&env_lookup, "ASKWEB_MAX_TOOL_ROUNDS")?
                .or(file_config.tools.max_rounds)
                .unwrap_or_else(defaults::default_max_tool_rounds),
        };

        let search_endpoint = file_config
            .tools
            .search
            .endpoint
            .as_deref()
            .map(|endpoint| expand_env_var_in_string(endpoint, &env_lookup))
            .unwrap_or_else(|| crate::search::DuckDuckGo::DEFAULT_ENDPOINT.to_string());

        Ok(Config {
            api_key,
            api_endpoint,
            model,
            system_prompt,
            request_timeout,
            bind,
            verbose,
            tools: ToolsSettings {
                enabled: tools_enabled,
                max_rounds,
                disabled: file_config.tools.disabled.clone(),
                search: SearchSettings {
                    endpoint: search_endpoint,
                    max_results: file_config
                        .tools
                        .search
                        .max_results
                        .min(crate::search::DEFAULT_MAX_RESULTS),
                },
            },
        })
    }

    pub fn get_current_date() -> String {
        chrono::Local::now().format("%A, %B %d, %Y").to_string()
    }
}

/// Read a numeric environment variable. Unset is `None`; a value that does not parse is an error.
fn parse_env<T>(env_lookup: impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env_lookup(key) {
        Some(value) => value.trim().parse::<T>().map(Some).map_err(|e| {
            AskWebError::ConfigError(format!("Invalid value for {}: '{}' ({})", key, value, e))
        }),
        None => Ok(None),
    }
}

impl FileConfig {
    /// Load the first config file found on the search path, or defaults.
    pub fn load() -> Result<Self> {
        for path in Self::get_config_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(FileConfig::default())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config = if matches!(extension, Some("yaml") | Some("yml")) {
            serde_yaml::from_str(&contents).with_context(|| {
                format!("Failed to parse YAML config file: {}", path.display())
            })?
        } else {
            serde_json::from_str(&contents).with_context(|| {
                format!("Failed to parse JSON config file: {}", path.display())
            })?
        };

        Ok(config)
    }

    pub fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".askweb.yaml"),
            PathBuf::from(".askweb.yml"),
            PathBuf::from(".askweb.json"),
        ];

        if let Some(home_dir) = dirs::home_dir() {
            let config_dir = home_dir.join(".config").join("askweb");
            paths.push(config_dir.join("askweb.yaml"));
            paths.push(config_dir.join("askweb.yml"));
            paths.push(config_dir.join("askweb.json"));
        }

        paths
    }
}
