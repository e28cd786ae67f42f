//! Provider trait

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A chat model endpoint
///
/// Agents hold an `Arc<dyn LLMProvider>`; tests substitute scripted or
/// mocked providers.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Name used in logs
    fn name(&self) -> &str;
}
