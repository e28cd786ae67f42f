//! Tool management and execution framework
//!
//! Tools are the functions an LLM agent may call while it works on a request.
//! Each agent owns a [`ToolRegistry`] holding exactly the tools it is bound to.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, optional_str, required_str};
