//! Completion request and response

use crate::{Message, ToolDefinition};

/// One call to the model
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: Option<String>,
    pub messages: Vec<Message>,
    pub max_tokens: usize,
    pub temperature: Option<f32>,
    /// Functions the model may call; empty means none are offered
    pub tools: Vec<ToolDefinition>,
    pub response_format: ResponseFormat,
}

impl CompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            system: None,
            messages,
            max_tokens: 1024,
            temperature: None,
            tools: Vec::new(),
            response_format: ResponseFormat::Text,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_response_format(mut self, format: ResponseFormat) -> Self {
        self.response_format = format;
        self
    }
}

/// What shape of answer the model is asked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResponseFormat {
    #[default]
    Text,
    /// `response_format: {"type": "json_object"}`
    JsonObject,
}

#[derive(Debug, Clone)]
pub struct CompletionResponse {
    pub message: Message,
    pub finish_reason: FinishReason,
    pub usage: TokenUsage,
}

/// Why the model stopped, as reported in `finish_reason`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// The turn is over
    Stop,
    /// Cut off by `max_tokens`
    Length,
    /// The model wants tool results before it continues
    ToolCalls,
    /// Blocked by the provider's safety filter
    ContentFilter,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokenUsage {
    pub input_tokens: usize,
    pub output_tokens: usize,
}

impl TokenUsage {
    pub fn total(&self) -> usize {
        self.input_tokens + self.output_tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_setters() {
        let request = CompletionRequest::new("gemini-1.5-flash", vec![Message::user("AAPL")])
            .with_system("You are a market data analyst")
            .with_max_tokens(2048)
            .with_temperature(Some(0.2))
            .with_response_format(ResponseFormat::JsonObject);

        assert_eq!(request.system.as_deref(), Some("You are a market data analyst"));
        assert_eq!(request.max_tokens, 2048);
        assert_eq!(request.temperature, Some(0.2));
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
        assert!(request.tools.is_empty());
    }

    #[test]
    fn test_request_defaults() {
        let request = CompletionRequest::new("m", Vec::new());
        assert_eq!(request.response_format, ResponseFormat::Text);
        assert_eq!(request.max_tokens, 1024);
        assert!(request.temperature.is_none());
    }

    #[test]
    fn test_token_usage_total() {
        let usage = TokenUsage {
            input_tokens: 812,
            output_tokens: 240,
        };
        assert_eq!(usage.total(), 1052);
    }
}
