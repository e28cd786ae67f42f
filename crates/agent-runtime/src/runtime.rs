//! Agent factory around a shared LLM provider

use agent_core::{Error, Result};
use agent_llm::LLMProvider;
use agent_tools::ToolRegistry;
use std::sync::Arc;
use tracing::info;

use crate::agents::{SimpleAgent, SimpleConfig, ToolAgent};
use crate::executor::{AgentExecutor, ExecutorConfig};

/// Defaults applied to every executor the runtime hands out
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub default_max_iterations: usize,
    pub default_model: String,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            default_max_iterations: 10,
            default_model: "gemini-1.5-flash".to_string(),
        }
    }
}

/// Builds agents that share one provider
///
/// ```no_run
/// use agent_runtime::{AgentRuntime, SimpleConfig};
/// use agent_llm::LLMProvider;
/// use std::sync::Arc;
///
/// # fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let runtime = AgentRuntime::builder()
///     .provider(provider)
///     .default_model("gemini-1.5-flash")
///     .build()?;
///
/// let coordinator = runtime.create_simple_agent(SimpleConfig::default(), "coordinator");
/// # Ok(())
/// # }
/// ```
pub struct AgentRuntime {
    provider: Arc<dyn LLMProvider>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::default()
    }

    pub fn provider(&self) -> &Arc<dyn LLMProvider> {
        &self.provider
    }

    /// Executor configuration seeded with the runtime defaults
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            max_iterations: self.config.default_max_iterations,
            model: self.config.default_model.clone(),
            ..ExecutorConfig::default()
        }
    }

    /// One completion per input, no tools
    pub fn create_simple_agent(&self, config: SimpleConfig, name: impl Into<String>) -> SimpleAgent {
        SimpleAgent::new(self.provider.clone(), config, name.into())
    }

    /// LLM and tool loop limited to the tools in `tools`
    pub fn create_tool_agent(
        &self,
        config: ExecutorConfig,
        tools: Arc<ToolRegistry>,
        name: impl Into<String>,
    ) -> ToolAgent {
        let name = name.into();
        info!(agent = %name, tools = ?tools.names(), "Creating tool agent");
        ToolAgent::new(AgentExecutor::new(self.provider.clone(), tools, config), name)
    }
}

#[derive(Default)]
pub struct AgentRuntimeBuilder {
    provider: Option<Arc<dyn LLMProvider>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    pub fn provider(mut self, provider: Arc<dyn LLMProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn default_max_iterations(mut self, max: usize) -> Self {
        self.config.default_max_iterations = max;
        self
    }

    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.config.default_model = model.into();
        self
    }

    /// Fails when no provider was set
    pub fn build(self) -> Result<AgentRuntime> {
        let provider = self
            .provider
            .ok_or_else(|| Error::InitializationFailed("Provider not set".to_string()))?;

        Ok(AgentRuntime {
            provider,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedProvider;
    use agent_core::Agent;

    fn runtime() -> AgentRuntime {
        AgentRuntime::builder()
            .provider(Arc::new(ScriptedProvider::default()))
            .default_max_iterations(4)
            .default_model("gemini-1.5-pro")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_requires_provider() {
        assert!(matches!(
            AgentRuntime::builder().build(),
            Err(Error::InitializationFailed(_))
        ));
    }

    #[test]
    fn test_executor_config_uses_defaults() {
        let config = runtime().executor_config();
        assert_eq!(config.max_iterations, 4);
        assert_eq!(config.model, "gemini-1.5-pro");

        let defaults = RuntimeConfig::default();
        assert_eq!(defaults.default_max_iterations, 10);
    }

    #[test]
    fn test_tool_agent_gets_given_registry() {
        let runtime = runtime();
        let own = Arc::new(ToolRegistry::new());
        let agent = runtime.create_tool_agent(runtime.executor_config(), own.clone(), "news-agent");

        assert_eq!(agent.name(), "news-agent");
        assert!(Arc::ptr_eq(agent.executor().tools(), &own));
        assert_eq!(runtime.provider().name(), "scripted");
    }
}
