//! Gemini through its OpenAI-compatible `/chat/completions` endpoint
//!
//! ```no_run
//! use agent_llm::{CompletionRequest, LLMProvider, Message};
//! use agent_llm::providers::{GeminiConfig, GeminiProvider};
//!
//! # async fn run() -> agent_llm::Result<()> {
//! let provider = GeminiProvider::new(GeminiConfig::new("AIza..."))?;
//! let request = CompletionRequest::new("gemini-1.5-flash", vec![Message::user("Summarise AAPL")]);
//! let response = provider.complete(request).await?;
//! println!("{}", response.message.content);
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, FinishReason, LLMError, LLMProvider, Message,
    ResponseFormat, Result, Role, TokenUsage, ToolCall,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Default base URL of the OpenAI-compatible surface
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    /// `/chat/completions` is appended to it
    pub api_base: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    #[instrument(skip_all, fields(model = %request.model))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let body = ChatRequest::from_request(&request);
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(LLMError::from_status(status, &request.model, &text));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| LLMError::MalformedResponse(e.to_string()))?;
        let completion = chat.into_completion()?;

        debug!(
            finish_reason = ?completion.finish_reason,
            input_tokens = completion.usage.input_tokens,
            output_tokens = completion.usage.output_tokens,
            "Chat completion received"
        );
        Ok(completion)
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<WireMessage<'a>>,
    max_tokens: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<Value>,
}

#[derive(Debug, Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct WireTool<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction<'a>,
}

#[derive(Debug, Serialize)]
struct WireFunction<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireCall {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireCallFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireCallFunction {
    name: String,
    /// JSON text
    #[serde(default)]
    arguments: String,
}

fn function_kind() -> String {
    "function".to_string()
}

impl<'a> ChatRequest<'a> {
    fn from_request(request: &'a CompletionRequest) -> Self {
        let system = request.system.as_deref().map(|text| WireMessage {
            role: "system",
            content: Some(text),
            tool_calls: Vec::new(),
            tool_call_id: None,
        });

        Self {
            model: &request.model,
            messages: system
                .into_iter()
                .chain(request.messages.iter().map(WireMessage::from_message))
                .collect(),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: request
                .tools
                .iter()
                .map(|tool| WireTool {
                    kind: "function",
                    function: WireFunction {
                        name: &tool.name,
                        description: &tool.description,
                        parameters: &tool.parameters,
                    },
                })
                .collect(),
            response_format: match request.response_format {
                ResponseFormat::Text => None,
                ResponseFormat::JsonObject => Some(serde_json::json!({"type": "json_object"})),
            },
        }
    }
}

impl<'a> WireMessage<'a> {
    fn from_message(message: &'a Message) -> Self {
        let role = match message.role {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::Tool => "tool",
        };
        // an assistant turn made only of tool calls carries no content
        let content = if message.content.is_empty() && !message.tool_calls.is_empty() {
            None
        } else {
            Some(message.content.as_str())
        };

        Self {
            role,
            content,
            tool_calls: message
                .tool_calls
                .iter()
                .map(|call| WireCall {
                    id: call.id.clone(),
                    kind: function_kind(),
                    function: WireCallFunction {
                        name: call.name.clone(),
                        arguments: call.arguments.to_string(),
                    },
                })
                .collect(),
            tool_call_id: message.tool_call_id.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireCall>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: usize,
    #[serde(default)]
    completion_tokens: usize,
}

impl ChatResponse {
    fn into_completion(self) -> Result<CompletionResponse> {
        let usage = self.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });
        let choice = self
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::MalformedResponse("response has no choices".to_string()))?;

        let calls = choice
            .message
            .tool_calls
            .into_iter()
            .enumerate()
            .map(|(index, call)| parse_call(index, call))
            .collect::<Result<Vec<_>>>()?;

        // Gemini reports "stop" even when the turn ends in tool calls
        let finish_reason = if calls.is_empty() {
            finish_reason(choice.finish_reason.as_deref())
        } else {
            FinishReason::ToolCalls
        };

        Ok(CompletionResponse {
            message: Message::assistant_calls(choice.message.content.unwrap_or_default(), calls),
            finish_reason,
            usage,
        })
    }
}

fn parse_call(index: usize, call: WireCall) -> Result<ToolCall> {
    let arguments = if call.function.arguments.trim().is_empty() {
        Value::Object(serde_json::Map::new())
    } else {
        serde_json::from_str(&call.function.arguments).map_err(|e| {
            LLMError::MalformedResponse(format!(
                "arguments of '{}' are not JSON: {e}",
                call.function.name
            ))
        })?
    };
    let id = if call.id.is_empty() {
        format!("call_{index}")
    } else {
        call.id
    };

    Ok(ToolCall {
        id,
        name: call.function.name,
        arguments,
    })
}

fn finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("length" | "max_tokens") => FinishReason::Length,
        Some("tool_calls") => FinishReason::ToolCalls,
        Some("content_filter" | "safety") => FinishReason::ContentFilter,
        Some("stop") | None => FinishReason::Stop,
        Some(other) => {
            warn!(finish_reason = other, "Unrecognised finish reason");
            FinishReason::Stop
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ToolDefinition;
    use serde_json::json;

    fn parse(body: Value) -> Result<CompletionResponse> {
        serde_json::from_value::<ChatResponse>(body).unwrap().into_completion()
    }

    #[test]
    fn test_config() {
        let config = GeminiConfig::new("key")
            .with_api_base("http://localhost:8080/v1/")
            .with_timeout(Duration::from_secs(30));
        assert_eq!(config.api_base, "http://localhost:8080/v1");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(GeminiConfig::new("key").api_base, GEMINI_API_BASE);

        let provider = GeminiProvider::new(config).unwrap();
        assert_eq!(provider.name(), "gemini");
    }

    #[test]
    fn test_request_body() {
        let request = CompletionRequest::new(
            "gemini-1.5-flash",
            vec![
                Message::user("AAPL"),
                Message::assistant_calls(
                    "",
                    vec![ToolCall {
                        id: "call_0".to_string(),
                        name: "stock_price".to_string(),
                        arguments: json!({"symbol": "AAPL"}),
                    }],
                ),
                Message::tool_result("call_0", r#"{"last_price":227.5}"#),
            ],
        )
        .with_system("You are the Market Data Analyst.")
        .with_tools(vec![ToolDefinition::new(
            "stock_price",
            "Latest quote",
            json!({"type": "object"}),
        )])
        .with_response_format(ResponseFormat::JsonObject);

        let body = serde_json::to_value(ChatRequest::from_request(&request)).unwrap();

        assert_eq!(body["messages"][0], json!({"role": "system", "content": "You are the Market Data Analyst."}));
        assert_eq!(body["messages"][1], json!({"role": "user", "content": "AAPL"}));
        assert!(body["messages"][2].get("content").is_none());
        assert_eq!(
            body["messages"][2]["tool_calls"][0]["function"]["arguments"],
            r#"{"symbol":"AAPL"}"#
        );
        assert_eq!(body["messages"][3]["role"], "tool");
        assert_eq!(body["messages"][3]["tool_call_id"], "call_0");
        assert_eq!(body["tools"][0]["type"], "function");
        assert_eq!(body["tools"][0]["function"]["name"], "stock_price");
        assert_eq!(body["response_format"]["type"], "json_object");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_plain_request_omits_optional_fields() {
        let request = CompletionRequest::new("m", vec![Message::user("hi")]);
        let body = serde_json::to_value(ChatRequest::from_request(&request)).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("response_format").is_none());
        assert_eq!(body["messages"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_text_response() {
        let response = parse(json!({
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "{\"ok\":true}"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 120, "completion_tokens": 8, "total_tokens": 128}
        }))
        .unwrap();

        assert_eq!(response.message.text(), Some("{\"ok\":true}"));
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.total(), 128);
    }

    #[test]
    fn test_tool_calls_with_stop_reason() {
        let response = parse(json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "tool_calls": [
                        {"id": "", "type": "function", "function": {"name": "stock_price", "arguments": "{\"symbol\":\"AAPL\"}"}},
                        {"function": {"name": "company_news", "arguments": ""}}
                    ]
                },
                "finish_reason": "stop"
            }]
        }))
        .unwrap();

        assert_eq!(response.finish_reason, FinishReason::ToolCalls);
        let calls = &response.message.tool_calls;
        assert_eq!(calls[0].id, "call_0");
        assert_eq!(calls[0].arguments["symbol"], "AAPL");
        assert_eq!(calls[1].id, "call_1");
        assert_eq!(calls[1].arguments, json!({}));
        assert_eq!(response.usage.total(), 0);
    }

    #[test]
    fn test_bad_arguments_are_rejected() {
        let err = parse(json!({
            "choices": [{"message": {"tool_calls": [{"id": "c", "function": {"name": "stock_price", "arguments": "{not json"}}]}}]
        }))
        .unwrap_err();
        assert!(matches!(err, LLMError::MalformedResponse(_)));
    }

    #[test]
    fn test_no_choices() {
        assert!(matches!(parse(json!({"choices": []})), Err(LLMError::MalformedResponse(_))));
    }

    #[test]
    fn test_finish_reasons() {
        assert_eq!(finish_reason(Some("length")), FinishReason::Length);
        assert_eq!(finish_reason(Some("content_filter")), FinishReason::ContentFilter);
        assert_eq!(finish_reason(Some("tool_calls")), FinishReason::ToolCalls);
        assert_eq!(finish_reason(None), FinishReason::Stop);
        assert_eq!(finish_reason(Some("other")), FinishReason::Stop);
    }
}
