//! Agent runtime for executing agents
//!
//! This crate provides the runtime infrastructure for executing agents:
//! the AgentExecutor for LLM/tool loops, AgentRuntime as the factory holding
//! the shared LLM provider, and the concrete agent implementations.

pub mod agents;
pub mod executor;
pub mod runtime;

#[cfg(test)]
pub(crate) mod testing;

// Re-export key types
pub use agents::{SimpleAgent, SimpleConfig, ToolAgent};
pub use executor::{AgentExecutor, ExecutorConfig};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
