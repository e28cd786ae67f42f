//! Simple agent implementation (LLM only, no tools)

use agent_core::{Agent, Context, Error, Result};
use agent_llm::{CompletionRequest, FinishReason, LLMProvider, Message, ResponseFormat};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};

/// Configuration for a simple agent
#[derive(Debug, Clone)]
pub struct SimpleConfig {
    /// Model to use
    pub model: String,

    /// System prompt
    pub system_prompt: String,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Temperature for sampling
    pub temperature: f32,

    /// Output format requested from the model
    pub response_format: ResponseFormat,
}

impl Default for SimpleConfig {
    fn default() -> Self {
        Self {
            model: "gemini-1.5-flash".to_string(),
            system_prompt: "You are a helpful assistant.".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
            response_format: ResponseFormat::Text,
        }
    }
}

/// A simple agent that uses LLM without tools
///
/// One request, one completion. The coordinator that merges member results
/// is a SimpleAgent running in JSON mode.
///
/// # Example
///
/// ```no_run
/// use agent_runtime::{SimpleAgent, SimpleConfig};
/// use agent_core::{Agent, Context};
/// use agent_llm::{LLMProvider, ResponseFormat};
/// use std::sync::Arc;
///
/// # async fn example(provider: Arc<dyn LLMProvider>) -> agent_core::Result<()> {
/// let config = SimpleConfig {
///     system_prompt: "Merge the inputs into one JSON object.".to_string(),
///     response_format: ResponseFormat::JsonObject,
///     ..SimpleConfig::default()
/// };
///
/// let agent = SimpleAgent::new(provider, config, "coordinator".to_string());
/// let mut context = Context::new();
/// let response = agent.process("{...}".to_string(), &mut context).await?;
/// # Ok(())
/// # }
/// ```
pub struct SimpleAgent {
    provider: Arc<dyn LLMProvider>,
    config: SimpleConfig,
    name: String,
}

impl SimpleAgent {
    /// Create a new simple agent
    pub fn new(provider: Arc<dyn LLMProvider>, config: SimpleConfig, name: String) -> Self {
        Self {
            provider,
            config,
            name,
        }
    }
}

#[async_trait]
impl Agent for SimpleAgent {
    async fn process(&self, input: String, context: &mut Context) -> Result<String> {
        context.set_agent(&self.name);
        debug!(agent = %self.name, symbol = ?context.symbol(), "Simple agent processing");

        let request = CompletionRequest::new(&self.config.model, vec![Message::user(input)])
            .with_system(self.config.system_prompt.as_str())
            .with_max_tokens(self.config.max_tokens)
            .with_temperature(Some(self.config.temperature))
            .with_response_format(self.config.response_format);

        let response = self
            .provider
            .complete(request)
            .await
            .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

        info!(
            agent = %self.name,
            finish_reason = ?response.finish_reason,
            total_tokens = response.usage.total(),
            "Simple agent completed"
        );

        let truncation = match response.finish_reason {
            FinishReason::Length => Some("response truncated by the token limit"),
            FinishReason::ContentFilter => Some("response blocked by the content filter"),
            FinishReason::Stop | FinishReason::ToolCalls => None,
        };
        if let Some(reason) = truncation {
            return Err(Error::Incomplete {
                agent: self.name.clone(),
                reason: reason.to_string(),
            });
        }

        match response.message.text().map(str::trim) {
            Some(text) if !text.is_empty() => Ok(text.to_string()),
            _ => Err(Error::Incomplete {
                agent: self.name.clone(),
                reason: "model returned an empty answer".to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_llm::{CompletionResponse, TokenUsage};
    use mockall::mock;

    mock! {
        Provider {}

        #[async_trait]
        impl LLMProvider for Provider {
            async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse>;
            fn name(&self) -> &str;
        }
    }

    fn reply(text: &str, finish_reason: FinishReason) -> CompletionResponse {
        CompletionResponse {
            message: Message::assistant(text),
            finish_reason,
            usage: TokenUsage::default(),
        }
    }

    #[test]
    fn test_simple_config_default() {
        let config = SimpleConfig::default();
        assert_eq!(config.model, "gemini-1.5-flash");
        assert_eq!(config.system_prompt, "You are a helpful assistant.");
        assert_eq!(config.max_tokens, 4096);
        assert_eq!(config.response_format, ResponseFormat::Text);
    }

    #[tokio::test]
    async fn test_process_sends_json_mode_request() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .withf(|req| {
                req.response_format == ResponseFormat::JsonObject
                    && req.system.as_deref() == Some("merge")
                    && req.tools.is_empty()
            })
            .times(1)
            .returning(|_| Ok(reply(" {\"ok\":true} ", FinishReason::Stop)));

        let config = SimpleConfig {
            system_prompt: "merge".to_string(),
            response_format: ResponseFormat::JsonObject,
            ..SimpleConfig::default()
        };
        let agent = SimpleAgent::new(Arc::new(provider), config, "coordinator".to_string());
        let mut context = Context::new().with_symbol("AAPL");

        let out = agent.process("inputs".to_string(), &mut context).await.unwrap();
        assert_eq!(out, "{\"ok\":true}");
        assert_eq!(context.agent(), Some("coordinator"));
        assert_eq!(agent.name(), "coordinator");
    }

    #[tokio::test]
    async fn test_truncated_reply_is_incomplete() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| Ok(reply("{\"stock", FinishReason::Length)));

        let agent = SimpleAgent::new(
            Arc::new(provider),
            SimpleConfig::default(),
            "coordinator".to_string(),
        );
        let err = agent
            .process("x".to_string(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Incomplete { .. }));
    }

    #[tokio::test]
    async fn test_provider_error_is_processing_failure() {
        let mut provider = MockProvider::new();
        provider
            .expect_complete()
            .returning(|_| {
                Err(agent_llm::LLMError::Unauthorized {
                    status: 401,
                    message: "API key not valid".to_string(),
                })
            });

        let agent = SimpleAgent::new(
            Arc::new(provider),
            SimpleConfig::default(),
            "coordinator".to_string(),
        );
        let err = agent
            .process("x".to_string(), &mut Context::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ProcessingFailed(_)));
    }
}
