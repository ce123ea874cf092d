use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "askweb")]
#[command(about = "Chat server that answers with an LLM and DuckDuckGo search", long_about = None)]
pub struct Args {
    #[arg(long = "bind", help = "Address to listen on (e.g., 127.0.0.1:8000)")]
    pub bind: Option<String>,

    #[arg(
        long = "api-endpoint",
        help = "Custom API base URL (e.g., http://localhost:11434/v1)"
    )]
    pub api_endpoint: Option<String>,

    #[arg(long = "model", help = "Model to request completions from")]
    pub model: Option<String>,

    #[arg(
        long = "max-tool-rounds",
        help = "Maximum tool-call rounds per user turn"
    )]
    pub max_tool_rounds: Option<usize>,

    #[arg(long = "no-tools", help = "Do not offer any tools to the model")]
    pub no_tools: bool,

    #[arg(short = 'v', long = "verbose", help = "Log requests and responses")]
    pub verbose: bool,

    #[arg(long = "config", help = "Read configuration from this file")]
    pub config: Option<PathBuf>,
}
