//! Stock analysis agents
//!
//! Three member agents gather a stock's picture concurrently:
//!
//! - a news agent collecting recent articles (Finnhub, web search)
//! - a price agent reporting the latest market data (Yahoo Finance)
//! - an analysis agent producing technical and fundamental analysis
//!
//! A coordinator merges their validated answers into a [`UnifiedResponse`].
//! [`StockService`] is the entry point used by the HTTP layer.
//!
//! # Example
//!
//! ```rust,ignore
//! use agent_stock::{AgentOrchestrator, StockConfig, StockService};
//! use agent_runtime::AgentRuntime;
//! use std::sync::Arc;
//!
//! let config = StockConfig::from_env()?;
//! let runtime = Arc::new(AgentRuntime::builder().provider(provider).build()?);
//! let orchestrator = AgentOrchestrator::new(runtime, config)?;
//! let service = StockService::new(Arc::new(orchestrator));
//!
//! let response = service.get_stock_data("AAPL").await?;
//! println!("{}", response.stock_data.price_data.last_price);
//! ```

pub mod agents;
pub mod api;
pub mod config;
pub mod error;
pub mod orchestrator;
pub mod prompts;
pub mod schemas;
pub mod service;
pub mod tools;

pub use agents::{AgentSpec, OutputKind};
pub use config::{StockConfig, StockConfigBuilder};
pub use error::{ErrorCategory, Result, StockError};
pub use orchestrator::{AgentOrchestrator, AnalysisPayload, StockAnalyzer, normalize_output};
pub use schemas::{
    AllFinancialNews, Analysis, FinancialNews, FundamentalAnalysis, OutputShape, PriceData,
    StockData, TechnicalAnalysis, UnifiedResponse,
};
pub use service::StockService;
pub use tools::ToolBox;
