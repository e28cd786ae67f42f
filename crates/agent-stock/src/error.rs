//! Error types for stock analysis operations

use thiserror::Error;

/// How a failure should be reported to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The symbol or another caller-supplied input was rejected
    InvalidArgument,
    /// The symbol is unknown to the data sources
    NotFound,
    /// Everything else
    Internal,
}

/// Stock analysis specific errors
#[derive(Debug, Error)]
pub enum StockError {
    /// Backend API request failed
    #[error("API error: {0}")]
    ApiError(String),

    /// Invalid stock symbol provided
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Symbol unknown to the market data sources
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// Network or HTTP error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Agent output that is not parseable JSON
    #[error("{0}")]
    InvalidJson(String),

    /// Agent output that parsed but does not fit the expected shape
    #[error("Schema validation failed: {0}")]
    Schema(String),

    /// Yahoo Finance API error
    #[error("Yahoo Finance error: {0}")]
    YahooFinanceError(String),

    /// Technical indicator calculation error
    #[error("Technical indicator error: {0}")]
    IndicatorError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Prompt template error
    #[error("Prompt template error: {0}")]
    Template(#[from] minijinja::Error),

    /// Agent execution error
    #[error("Agent error: {0}")]
    Agent(agent_core::Error),

    /// Analysis request failed
    #[error("{0}")]
    Analysis(String),
}

impl StockError {
    /// Category used to pick the HTTP status for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSymbol(_) => ErrorCategory::InvalidArgument,
            Self::SymbolNotFound(_) => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to agent_core::Error
impl From<StockError> for agent_core::Error {
    fn from(err: StockError) -> Self {
        agent_core::Error::ProcessingFailed(err.to_string())
    }
}

/// A run ended by a missing subject becomes `SymbolNotFound`
impl From<agent_core::Error> for StockError {
    fn from(err: agent_core::Error) -> Self {
        match err {
            agent_core::Error::NotFound(symbol) => Self::SymbolNotFound(symbol),
            other => Self::Agent(other),
        }
    }
}
