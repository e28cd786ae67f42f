//! Prompt templates for the stock analysis agents
//!
//! - `system`: the system prompt shared by all agents, filled from an
//!   [`AgentSpec`](crate::agents::AgentSpec)
//! - `user`: the per-request messages sent to members and coordinator
//!
//! Templates are rendered with MiniJinja.

mod system;
mod user;

pub use system::render_system_prompt;
pub use user::{render_coordinator_input, render_member_task};

use crate::error::Result;
use minijinja::Environment;
use serde::Serialize;

fn render<S: Serialize>(template: &str, vars: S) -> Result<String> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    let rendered = env.render_str(template, minijinja::Value::from_serialize(&vars))?;
    Ok(rendered)
}
