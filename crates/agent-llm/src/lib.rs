//! Model access for the stock analysis agents
//!
//! Messages, completion requests and function declarations in the chat
//! completions shape, the `LLMProvider` trait agents are written against,
//! and a Gemini provider behind the `gemini` feature.

pub mod completion;
pub mod error;
pub mod messages;
pub mod provider;
pub mod tools;

#[cfg(feature = "gemini")]
pub mod providers;

pub use completion::{
    CompletionRequest, CompletionResponse, FinishReason, ResponseFormat, TokenUsage,
};
pub use error::{LLMError, Result};
pub use messages::{Message, Role, ToolCall};
pub use provider::LLMProvider;
pub use tools::ToolDefinition;
