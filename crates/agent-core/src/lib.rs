//! Core abstractions for the stock analysis agents
//!
//! This crate defines the `Agent` trait, the per-request `Context` and the
//! shared error type used by every other crate in the workspace.

pub mod agent;
pub mod context;
pub mod error;

pub use agent::Agent;
pub use context::Context;
pub use error::{Error, Result};
