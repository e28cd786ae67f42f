//! Per-request context
//!
//! Created fresh for each member agent run and never shared between
//! requests. Agents record themselves in it so log lines can be tied back to
//! the request.

/// What an agent knows about the request it is serving
///
/// ```
/// use agent_core::Context;
///
/// let ctx = Context::new().with_symbol("AAPL").with_request_id("req-7");
/// assert_eq!(ctx.symbol(), Some("AAPL"));
/// assert_eq!(ctx.request_id(), Some("req-7"));
/// assert_eq!(ctx.agent(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    symbol: Option<String>,
    request_id: Option<String>,
    agent: Option<String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn symbol(&self) -> Option<&str> {
        self.symbol.as_deref()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// Record the agent now working on the request
    pub fn set_agent(&mut self, agent: impl Into<String>) {
        self.agent = Some(agent.into());
    }

    pub fn agent(&self) -> Option<&str> {
        self.agent.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Agent, Result};
    use async_trait::async_trait;

    #[test]
    fn test_set_agent_keeps_request_data() {
        let mut ctx = Context::new().with_symbol("MSFT").with_request_id("req-1");
        ctx.set_agent("price-agent");
        ctx.set_agent("news-agent");

        assert_eq!(ctx.symbol(), Some("MSFT"));
        assert_eq!(ctx.request_id(), Some("req-1"));
        assert_eq!(ctx.agent(), Some("news-agent"));
    }

    mockall::mock! {
        EchoAgent {}

        #[async_trait]
        impl Agent for EchoAgent {
            async fn process(&self, input: String, context: &mut Context) -> Result<String>;
            fn name(&self) -> &str;
        }
    }

    #[test]
    fn test_agent_reads_symbol_from_context() {
        let mut agent = MockEchoAgent::new();
        agent
            .expect_process()
            .returning(|input, ctx| Ok(format!("{input}:{}", ctx.symbol().unwrap_or("?"))));

        let mut ctx = Context::new().with_symbol("TSLA");
        let output = tokio_test::block_on(agent.process("quote".to_string(), &mut ctx)).unwrap();
        assert_eq!(output, "quote:TSLA");
    }
}
