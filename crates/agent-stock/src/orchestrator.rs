//! Coordinates the member agents and the coordinator for one request
//!
//! The three members run concurrently. Each answer is cleaned, checked for an
//! error envelope and validated against the member's shape before the
//! coordinator merges them. The first failure aborts the request.

use agent_core::{Agent, Context};
use agent_llm::ResponseFormat;
use agent_runtime::{AgentRuntime, SimpleAgent, SimpleConfig, ToolAgent};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::agents::{AgentSpec, roster};
use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::prompts;
use crate::schemas::UnifiedResponse;
use crate::service::clean_json_response;
use crate::tools::ToolBox;

/// Result handed from the orchestrator to the service
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisPayload {
    /// Already validated response
    Unified(UnifiedResponse),
    /// Loosely typed mapping still to be coerced into a response
    Mapping(Value),
}

/// Produces the analysis for one stock symbol
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StockAnalyzer: Send + Sync {
    async fn analyze(&self, symbol: &str) -> Result<AnalysisPayload>;
}

struct Member {
    spec: AgentSpec,
    agent: ToolAgent,
}

/// Multi-agent analyzer
pub struct AgentOrchestrator {
    news: Member,
    price: Member,
    analysis: Member,
    coordinator: SimpleAgent,
    requests: AtomicU64,
}

impl AgentOrchestrator {
    /// Build all four agents with the default tool set
    ///
    /// Fails if a prompt cannot be rendered or a tool cannot be built. The
    /// caller must not serve traffic without an orchestrator.
    pub fn new(runtime: Arc<AgentRuntime>, config: StockConfig) -> Result<Self> {
        let toolbox = ToolBox::new(&config)?;
        Self::with_toolbox(&runtime, &config, &toolbox)
    }

    /// Build all four agents, binding tools from `toolbox`
    pub fn with_toolbox(
        runtime: &AgentRuntime,
        config: &StockConfig,
        toolbox: &ToolBox,
    ) -> Result<Self> {
        let [news, price, analysis] = roster::members(config);

        let orchestrator = Self {
            news: build_member(runtime, config, toolbox, news)?,
            price: build_member(runtime, config, toolbox, price)?,
            analysis: build_member(runtime, config, toolbox, analysis)?,
            coordinator: build_coordinator(runtime, config, &roster::coordinator(config))?,
            requests: AtomicU64::new(0),
        };

        info!(
            model = %config.model,
            provider = runtime.provider().name(),
            "Agent orchestrator ready"
        );
        Ok(orchestrator)
    }

    async fn run_member(&self, member: &Member, symbol: &str, request_id: &str) -> Result<Value> {
        let started = Instant::now();
        let mut context = Context::new()
            .with_symbol(symbol)
            .with_request_id(request_id);

        let task = prompts::render_member_task(symbol)?;
        let raw = member.agent.process(task, &mut context).await?;

        let value = clean_json_response(&raw)?;
        check_error_envelope(symbol, &value)?;
        let checked = member.spec.output.check(value)?;

        info!(
            request_id,
            agent = member.spec.id,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Member agent finished"
        );
        Ok(checked)
    }
}

fn build_member(
    runtime: &AgentRuntime,
    config: &StockConfig,
    toolbox: &ToolBox,
    spec: AgentSpec,
) -> Result<Member> {
    let tools = Arc::new(toolbox.registry_for(&spec.tools)?);

    let mut executor_config = runtime.executor_config();
    executor_config.model.clone_from(&config.model);
    executor_config.system_prompt = Some(spec.system_prompt()?);
    executor_config.max_iterations = config.member_max_iterations;
    executor_config.max_tokens = config.max_tokens;
    executor_config.temperature = Some(config.temperature);
    executor_config.response_format = ResponseFormat::Text;

    let agent = runtime.create_tool_agent(executor_config, tools, spec.id);
    Ok(Member { spec, agent })
}

fn build_coordinator(
    runtime: &AgentRuntime,
    config: &StockConfig,
    spec: &AgentSpec,
) -> Result<SimpleAgent> {
    let simple = SimpleConfig {
        model: config.model.clone(),
        system_prompt: spec.system_prompt()?,
        max_tokens: config.max_tokens,
        temperature: config.temperature,
        response_format: ResponseFormat::JsonObject,
    };
    Ok(runtime.create_simple_agent(simple, spec.id))
}

#[async_trait]
impl StockAnalyzer for AgentOrchestrator {
    async fn analyze(&self, symbol: &str) -> Result<AnalysisPayload> {
        let request_id = format!("req-{}", self.requests.fetch_add(1, Ordering::Relaxed) + 1);
        let started = Instant::now();
        info!(%request_id, symbol, "Starting stock analysis");

        let (news, price, analysis) = tokio::try_join!(
            self.run_member(&self.news, symbol, &request_id),
            self.run_member(&self.price, symbol, &request_id),
            self.run_member(&self.analysis, symbol, &request_id),
        )
        .inspect_err(|e| warn!(%request_id, symbol, error = %e, "Member agent failed"))?;

        let input = prompts::render_coordinator_input(symbol, &news, &price, &analysis)?;
        let mut context = Context::new()
            .with_symbol(symbol)
            .with_request_id(request_id.as_str());
        let raw = self.coordinator.process(input, &mut context).await?;
        let response = normalize_output(symbol, &raw)?;

        if !response.stock_data.price_data.symbol.eq_ignore_ascii_case(symbol) {
            warn!(
                %request_id,
                symbol,
                reported = %response.stock_data.price_data.symbol,
                "Coordinator reported a different symbol"
            );
        }

        info!(
            %request_id,
            symbol,
            articles = response.stock_data.financial_news.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Stock analysis complete"
        );
        Ok(AnalysisPayload::Unified(response))
    }
}

/// Turn an agent's final answer into a `UnifiedResponse`
///
/// Accepts the response object itself, a wrapper whose `content` holds the
/// object or its text, or the text of the object, fenced or not.
pub fn normalize_output(symbol: &str, raw: &str) -> Result<UnifiedResponse> {
    let value = clean_json_response(raw)?;
    normalize_value(symbol, value)
}

fn normalize_value(symbol: &str, value: Value) -> Result<UnifiedResponse> {
    check_error_envelope(symbol, &value)?;

    match value {
        Value::Object(mut map) if !map.contains_key("stock_data") && map.contains_key("content") => {
            debug!("Unwrapping content wrapper");
            match map.remove("content") {
                Some(Value::String(text)) => normalize_output(symbol, &text),
                Some(inner) => normalize_value(symbol, inner),
                None => Err(StockError::Schema("empty content wrapper".to_string())),
            }
        }
        other => UnifiedResponse::from_mapping(other),
    }
}

/// Map `{"error": {"kind": .., "message": ..}}` answers to typed errors
///
/// `"error": null`, an empty object and an empty string carry no error.
fn check_error_envelope(symbol: &str, value: &Value) -> Result<()> {
    let Some(error) = value.get("error") else {
        return Ok(());
    };
    let reported = match error {
        Value::Object(fields) => !fields.is_empty(),
        Value::String(text) => !text.trim().is_empty(),
        _ => false,
    };
    if !reported {
        return Ok(());
    }

    let kind = error.get("kind").and_then(Value::as_str).unwrap_or_default();
    let message = error
        .get("message")
        .and_then(Value::as_str)
        .or_else(|| error.as_str())
        .unwrap_or_default()
        .trim();
    let subject = if message.is_empty() {
        symbol.to_string()
    } else {
        format!("{symbol}: {message}")
    };

    Err(match kind {
        "not_found" => StockError::SymbolNotFound(subject),
        "invalid_symbol" => StockError::InvalidSymbol(subject),
        _ => StockError::Analysis(format!("Agent reported an error for {subject}")),
    })
}
