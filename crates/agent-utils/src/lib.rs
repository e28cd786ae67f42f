//! Shared utilities for the stock analysis workspace
//!
//! Logging setup and environment-driven configuration helpers used by the
//! binaries and by crates that read their settings from the environment.

pub mod config;
pub mod logging;

pub use config::{Config, env_or, env_parse_or, load_dotenv};
pub use logging::{LogFormat, init_tracing_with};
