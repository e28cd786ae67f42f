//! Configuration for stock analysis operations
//!
//! Credentials live in the config and are handed to the orchestrator
//! explicitly. Nothing here writes to the process environment.

use crate::error::{Result, StockError};
use agent_utils::{env_or, env_parse_or};
use std::time::Duration;

/// Gemini's OpenAI-compatible chat completions base URL
pub const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";

/// Model shared by every agent
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Configuration for stock analysis operations
#[derive(Debug, Clone)]
pub struct StockConfig {
    /// LLM credential (`GOOGLE_API_KEY`)
    pub llm_api_key: Option<String>,

    /// Company news and fundamentals credential (`FINNHUB_API_KEY`)
    pub finnhub_api_key: Option<String>,

    /// Chat completions base URL
    pub llm_api_base: String,

    /// Model used by all agents
    pub model: String,

    /// Timeout for LLM calls
    pub llm_timeout: Duration,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: f32,

    /// Iteration cap for the tool-using member agents
    pub member_max_iterations: usize,

    /// Number of news articles the news agent collects
    pub news_count: usize,

    /// How far back company news is searched, in days
    pub news_lookback_days: i64,

    /// Finnhub requests per minute
    pub finnhub_rate_limit: u32,

    /// Web search requests per minute
    pub search_rate_limit: u32,

    /// Timeout for market data, search and article requests
    pub request_timeout: Duration,

    /// Article text is cut to this many characters before it reaches the model
    pub article_max_chars: usize,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            llm_api_key: None,
            finnhub_api_key: None,
            llm_api_base: DEFAULT_LLM_API_BASE.to_string(),
            model: DEFAULT_MODEL.to_string(),
            llm_timeout: Duration::from_secs(120),
            max_tokens: 4096,
            temperature: 0.2,
            member_max_iterations: 8,
            news_count: 5,
            news_lookback_days: 30,
            finnhub_rate_limit: 60,
            search_rate_limit: 30,
            request_timeout: Duration::from_secs(30),
            article_max_chars: 4000,
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Read the configuration from the environment
    ///
    /// Keys are read but not checked: a missing key only surfaces when the
    /// call that needs it fails.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            llm_api_key: non_empty_var("GOOGLE_API_KEY"),
            finnhub_api_key: non_empty_var("FINNHUB_API_KEY"),
            llm_api_base: env_or("LLM_API_BASE", &defaults.llm_api_base),
            model: env_or("LLM_MODEL", &defaults.model),
            llm_timeout: Duration::from_secs(env_parse_or(
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout.as_secs(),
            )),
            max_tokens: env_parse_or("LLM_MAX_TOKENS", defaults.max_tokens),
            temperature: env_parse_or("LLM_TEMPERATURE", defaults.temperature),
            member_max_iterations: env_parse_or(
                "AGENT_MAX_ITERATIONS",
                defaults.member_max_iterations,
            ),
            news_count: env_parse_or("NEWS_ARTICLE_COUNT", defaults.news_count),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(StockError::ConfigError(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }

        if self.member_max_iterations == 0 {
            return Err(StockError::ConfigError(
                "member_max_iterations must be greater than 0".to_string(),
            ));
        }

        if self.news_count == 0 {
            return Err(StockError::ConfigError(
                "news_count must be greater than 0".to_string(),
            ));
        }

        if self.llm_api_base.trim().is_empty() {
            return Err(StockError::ConfigError("LLM API base URL is empty".to_string()));
        }

        Ok(())
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    llm_api_key: Option<String>,
    finnhub_api_key: Option<String>,
    llm_api_base: Option<String>,
    model: Option<String>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
    member_max_iterations: Option<usize>,
    news_count: Option<usize>,
    request_timeout: Option<Duration>,
}

impl StockConfigBuilder {
    /// Set the LLM API key
    pub fn llm_api_key(mut self, key: impl Into<String>) -> Self {
        self.llm_api_key = Some(key.into());
        self
    }

    /// Set the Finnhub API key
    pub fn finnhub_api_key(mut self, key: impl Into<String>) -> Self {
        self.finnhub_api_key = Some(key.into());
        self
    }

    /// Set the chat completions base URL
    pub fn llm_api_base(mut self, base: impl Into<String>) -> Self {
        self.llm_api_base = Some(base.into());
        self
    }

    /// Set the model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the member agents' iteration cap
    pub fn member_max_iterations(mut self, max: usize) -> Self {
        self.member_max_iterations = Some(max);
        self
    }

    /// Set the number of news articles to collect
    pub fn news_count(mut self, count: usize) -> Self {
        self.news_count = Some(count);
        self
    }

    /// Set the data request timeout
    pub fn request_timeout(mut self, duration: Duration) -> Self {
        self.request_timeout = Some(duration);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();

        let config = StockConfig {
            llm_api_key: self.llm_api_key,
            finnhub_api_key: self.finnhub_api_key,
            llm_api_base: self.llm_api_base.unwrap_or(defaults.llm_api_base),
            model: self.model.unwrap_or(defaults.model),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            member_max_iterations: self
                .member_max_iterations
                .unwrap_or(defaults.member_max_iterations),
            news_count: self.news_count.unwrap_or(defaults.news_count),
            request_timeout: self.request_timeout.unwrap_or(defaults.request_timeout),
            ..defaults
        };

        config.validate()?;
        Ok(config)
    }
}
