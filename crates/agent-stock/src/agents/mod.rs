//! Stock analysis agents
//!
//! `spec` defines the agent record, `roster` the four agents used for a
//! request.

pub mod roster;
pub mod spec;

pub use spec::{AgentSpec, OutputKind};
