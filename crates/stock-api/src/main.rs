//! Stock analysis API server

use agent_llm::providers::{GeminiConfig, GeminiProvider};
use agent_runtime::AgentRuntime;
use agent_stock::{AgentOrchestrator, StockConfig, StockService};
use agent_utils::LogFormat;
use clap::Parser;
use std::sync::Arc;
use stock_api::{AppState, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let found_dotenv = agent_utils::load_dotenv();
    let server = ServerConfig::parse();

    agent_utils::init_tracing_with(if server.log_json {
        LogFormat::Json
    } else {
        LogFormat::Pretty
    });

    let app = agent_utils::Config::from_env();
    info!(app = %app.app_name, environment = %app.environment, found_dotenv, "Starting");

    let config = StockConfig::from_env()?;
    let provider = GeminiProvider::new(
        GeminiConfig::new(config.llm_api_key.clone().unwrap_or_default())
            .with_api_base(config.llm_api_base.clone())
            .with_timeout(config.llm_timeout),
    )?;

    let runtime = Arc::new(
        AgentRuntime::builder()
            .provider(Arc::new(provider))
            .default_model(config.model.clone())
            .default_max_iterations(config.member_max_iterations)
            .build()?,
    );

    // no orchestrator, no server
    let orchestrator = AgentOrchestrator::new(runtime, config)?;
    let state = AppState::new(StockService::new(Arc::new(orchestrator)));

    stock_api::run_server(&server, state).await
}
