use askweb::api::OpenAiClient;
use askweb::cli::Args;
use askweb::config::Config;
use askweb::orchestrator::Orchestrator;
use askweb::search::{DuckDuckGo, SearchAdapter};
use askweb::server::{self, AppState};
use askweb::session::InMemorySessionStore;
use askweb::tools::build_registry;
use clap::Parser;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match Config::from_env_and_args(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let default_filter = if config.verbose {
        "debug,hyper=info,reqwest=info"
    } else {
        "info,tower_http=debug"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout))
        .build()?;

    let llm = OpenAiClient::new(
        http.clone(),
        config.api_key.clone(),
        config.api_endpoint.clone(),
        config.model.clone(),
    );

    let search = Arc::new(SearchAdapter::new(
        Arc::new(DuckDuckGo::new(http, config.tools.search.endpoint.clone())),
        config.tools.search.max_results,
    ));
    let registry = build_registry(&config.tools, search);

    let tool_names: Vec<&str> = registry.list().into_iter().map(|t| t.name()).collect();
    tracing::info!(
        model = %config.model,
        endpoint = %config.api_endpoint,
        tools = %tool_names.join(", "),
        max_tool_rounds = config.tools.max_rounds,
        "configured chat engine"
    );

    let orchestrator = Orchestrator::new(Arc::new(llm), Arc::new(registry))
        .with_system_prompt(config.system_prompt.clone())
        .with_max_tool_rounds(config.tools.max_rounds);

    let state = AppState::new(Arc::new(orchestrator), Arc::new(InMemorySessionStore::new()));
    let app = server::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
