//! The LLM and tool loop behind every tool-using agent
//!
//! Each iteration sends the conversation to the model. Tool calls are run and
//! their results appended; a final text turn ends the loop. Running out of
//! iterations, hitting the token limit or being filtered is an
//! `Error::Incomplete`, never a placeholder answer.

use agent_core::{Error, Result};
use agent_llm::{
    CompletionRequest, FinishReason, LLMProvider, Message, ResponseFormat, ToolDefinition,
};
use agent_tools::ToolRegistry;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

const DEFAULT_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Upper bound on model calls per run
    pub max_iterations: usize,
    pub model: String,
    pub system_prompt: Option<String>,
    /// Per completion
    pub max_tokens: usize,
    pub temperature: Option<f32>,
    pub response_format: ResponseFormat,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10,
            model: "gemini-1.5-flash".to_string(),
            system_prompt: None,
            max_tokens: 4096,
            temperature: Some(0.7),
            response_format: ResponseFormat::Text,
        }
    }
}

pub struct AgentExecutor {
    provider: Arc<dyn LLMProvider>,
    tool_registry: Arc<ToolRegistry>,
    config: ExecutorConfig,
    name: String,
}

impl AgentExecutor {
    pub fn new(
        provider: Arc<dyn LLMProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: ExecutorConfig,
    ) -> Self {
        Self {
            provider,
            tool_registry,
            config,
            name: "agent".to_string(),
        }
    }

    /// Name used in logs and in [`Error::Incomplete`]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn tools(&self) -> &Arc<ToolRegistry> {
        &self.tool_registry
    }

    /// Run the loop for one user message and return the final answer
    pub async fn run(&self, user_message: String) -> Result<String> {
        let mut conversation = vec![Message::user(user_message)];
        let tools = self.build_tool_definitions();
        debug!(agent = %self.name, tool_count = tools.len(), "Available tools");

        for iteration in 1..=self.config.max_iterations {
            info!(
                agent = %self.name,
                iteration = iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let request = CompletionRequest::new(&self.config.model, conversation.clone())
                .with_system(
                    self.config
                        .system_prompt
                        .as_deref()
                        .unwrap_or(DEFAULT_SYSTEM_PROMPT),
                )
                .with_max_tokens(self.config.max_tokens)
                .with_temperature(self.config.temperature)
                .with_tools(tools.clone())
                .with_response_format(self.config.response_format);

            let response = self
                .provider
                .complete(request)
                .await
                .map_err(|e| Error::ProcessingFailed(e.to_string()))?;

            info!(
                agent = %self.name,
                finish_reason = ?response.finish_reason,
                tool_calls = response.message.tool_calls.len(),
                input_tokens = response.usage.input_tokens,
                output_tokens = response.usage.output_tokens,
                "LLM response received"
            );

            match response.finish_reason {
                FinishReason::Stop => {
                    let text = response.message.content.trim();
                    if text.is_empty() {
                        return Err(self.incomplete("model returned an empty answer"));
                    }
                    let preview: String = text.chars().take(300).collect();
                    debug!(agent = %self.name, %preview, "Final answer preview");
                    info!(
                        agent = %self.name,
                        iteration,
                        response_length = text.len(),
                        "Agent completed"
                    );
                    return Ok(text.to_string());
                }

                FinishReason::ToolCalls => {
                    if response.message.tool_calls.is_empty() {
                        return Err(self.incomplete("tool use requested without any tool call"));
                    }
                    let results = self.execute_tools(&response.message).await?;
                    conversation.push(response.message);
                    conversation.extend(results);
                }

                FinishReason::Length => {
                    warn!(agent = %self.name, "Hit max tokens in LLM response");
                    return Err(self.incomplete("response truncated by the token limit"));
                }

                FinishReason::ContentFilter => {
                    warn!(agent = %self.name, "Response blocked by the content filter");
                    return Err(self.incomplete("response blocked by the content filter"));
                }
            }
        }

        warn!(
            agent = %self.name,
            max_iterations = self.config.max_iterations,
            "Max iterations reached, stopping"
        );
        Err(self.incomplete(&format!(
            "max iterations ({}) reached",
            self.config.max_iterations
        )))
    }

    fn incomplete(&self, reason: &str) -> Error {
        Error::Incomplete {
            agent: self.name.clone(),
            reason: reason.to_string(),
        }
    }

    /// Build tool definitions from the registry
    fn build_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tool_registry
            .list_tools()
            .iter()
            .map(|tool| ToolDefinition::new(tool.name(), tool.description(), tool.input_schema()))
            .collect()
    }

    /// Run every tool call of an assistant message, in order
    ///
    /// Failures, including calls to unknown tools, are answered with error
    /// results for the model to read. `Error::NotFound` ends the run instead.
    async fn execute_tools(&self, message: &Message) -> Result<Vec<Message>> {
        let mut results = Vec::with_capacity(message.tool_calls.len());

        for call in &message.tool_calls {
            let input_preview: String = call.arguments.to_string().chars().take(500).collect();
            info!(
                agent = %self.name,
                tool_name = %call.name,
                tool_id = %call.id,
                %input_preview,
                "Executing tool"
            );

            let Some(tool) = self.tool_registry.get(&call.name) else {
                warn!(agent = %self.name, tool_name = %call.name, "Model called an unknown tool");
                results.push(Message::tool_error(
                    &call.id,
                    format!("Error: unknown tool '{}'", call.name),
                ));
                continue;
            };

            let started = Instant::now();
            match tool.execute(call.arguments.clone()).await {
                Ok(output) => {
                    let output = output.to_string();
                    info!(
                        tool_name = %call.name,
                        duration_ms = started.elapsed().as_millis() as u64,
                        result_length = output.len(),
                        "Tool execution succeeded"
                    );
                    results.push(Message::tool_result(&call.id, output));
                }
                Err(Error::NotFound(what)) => {
                    warn!(agent = %self.name, tool_name = %call.name, %what, "Tool reported a missing subject");
                    return Err(Error::NotFound(what));
                }
                Err(e) => {
                    warn!(
                        tool_name = %call.name,
                        duration_ms = started.elapsed().as_millis() as u64,
                        error = %e,
                        "Tool execution failed"
                    );
                    results.push(Message::tool_error(&call.id, format!("Error: {e}")));
                }
            }
        }

        Ok(results)
    }
}
