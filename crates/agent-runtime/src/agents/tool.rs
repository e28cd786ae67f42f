//! Tool agent implementation (wraps AgentExecutor)

use crate::executor::AgentExecutor;
use agent_core::{Agent, Context, Result};
use async_trait::async_trait;
use tracing::debug;

/// An agent that uses the LLM loop with tool execution
///
/// ToolAgent wraps the AgentExecutor to provide the Agent trait interface.
/// The news, price and analysis agents are all ToolAgents, each with its
/// own tool registry.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, ExecutorConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::LLMProvider;
/// use agent_tools::ToolRegistry;
/// use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn LLMProvider>, tools: Arc<ToolRegistry>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder().provider(provider).build()?;
///
/// let agent = runtime.create_tool_agent(ExecutorConfig::default(), tools, "price-agent");
///
/// let mut context = Context::new().with_symbol("AAPL");
/// let response = agent.process("AAPL".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct ToolAgent {
    executor: AgentExecutor,
    name: String,
}

impl ToolAgent {
    /// Create a new tool agent; the executor takes the agent's name
    pub fn new(executor: AgentExecutor, name: String) -> Self {
        Self {
            executor: executor.with_name(name.clone()),
            name,
        }
    }

    /// Get a reference to the underlying executor
    pub fn executor(&self) -> &AgentExecutor {
        &self.executor
    }
}

#[async_trait]
impl Agent for ToolAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        context.set_agent(&self.name);
        debug!(
            agent = %self.name,
            symbol = ?context.symbol(),
            request_id = ?context.request_id(),
            "Tool agent processing"
        );
        self.executor.run(input).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
