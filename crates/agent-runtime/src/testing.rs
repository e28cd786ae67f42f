//! Scripted LLM provider used by the unit tests in this crate

use agent_llm::{
    CompletionRequest, CompletionResponse, FinishReason, LLMError, LLMProvider, Message,
    TokenUsage, ToolCall,
};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned responses in order and records every request it sees
#[derive(Default)]
pub struct ScriptedProvider {
    responses: Mutex<VecDeque<CompletionResponse>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn new(responses: impl IntoIterator<Item = CompletionResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LLMProvider for ScriptedProvider {
    async fn complete(&self, request: CompletionRequest) -> agent_llm::Result<CompletionResponse> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LLMError::Provider("script exhausted".to_string()))
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

pub fn text(body: &str) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(body),
        finish_reason: FinishReason::Stop,
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

pub fn truncated(body: &str) -> CompletionResponse {
    CompletionResponse {
        finish_reason: FinishReason::Length,
        ..text(body)
    }
}

pub fn filtered() -> CompletionResponse {
    CompletionResponse {
        finish_reason: FinishReason::ContentFilter,
        ..text("")
    }
}

pub fn tool_call(id: &str, name: &str, arguments: Value) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant_calls(
            "",
            vec![ToolCall {
                id: id.to_string(),
                name: name.to_string(),
                arguments,
            }],
        ),
        finish_reason: FinishReason::ToolCalls,
        usage: TokenUsage::default(),
    }
}
