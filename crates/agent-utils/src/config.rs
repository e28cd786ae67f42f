//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (development, production, ...)
    pub environment: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "stock-analysis-api".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Config {
    /// Read `APP_NAME` and `APP_ENV`, falling back to the defaults
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            app_name: env_or("APP_NAME", &defaults.app_name),
            environment: env_or("APP_ENV", &defaults.environment),
        }
    }
}

/// Load a `.env` file from the working directory or its parents
///
/// Returns `true` if a file was found. A missing file is not an error.
pub fn load_dotenv() -> bool {
    dotenvy::dotenv().is_ok()
}

/// Read an environment variable, falling back to `default` when unset
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Read and parse an environment variable, falling back to `default` when
/// unset or unparsable
pub fn env_parse_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "stock-analysis-api");
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_env_or_fallback() {
        assert_eq!(env_or("AGENT_UTILS_TEST_UNSET_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_env_parse_or() {
        // SAFETY: test-local variable names, not read anywhere else
        unsafe {
            std::env::set_var("AGENT_UTILS_TEST_PORT", "9001");
            std::env::set_var("AGENT_UTILS_TEST_BAD_PORT", "not-a-number");
        }
        assert_eq!(env_parse_or("AGENT_UTILS_TEST_PORT", 8000_u16), 9001);
        assert_eq!(env_parse_or("AGENT_UTILS_TEST_BAD_PORT", 8000_u16), 8000);
        assert_eq!(env_parse_or("AGENT_UTILS_TEST_MISSING", 8000_u16), 8000);
    }
}
