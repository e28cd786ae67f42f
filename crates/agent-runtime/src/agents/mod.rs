//! Concrete agent implementations
//!
//! - SimpleAgent: single LLM call without tools
//! - ToolAgent: LLM loop with tool execution

pub mod simple;
pub mod tool;

pub use simple::{SimpleAgent, SimpleConfig};
pub use tool::ToolAgent;
