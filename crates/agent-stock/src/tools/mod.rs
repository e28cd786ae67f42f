//! Stock analysis tools for LLM agents
//!
//! Every tool is created once per [`ToolBox`] and shared between the agents
//! that list it.

pub mod article;
pub mod fundamental;
pub mod news;
pub mod stock_data;
pub mod technical;
pub mod web_search;

pub use article::ReadArticleTool;
pub use fundamental::StockFundamentalsTool;
pub use news::CompanyNewsTool;
pub use stock_data::StockPriceTool;
pub use technical::TechnicalIndicatorsTool;
pub use web_search::WebSearchTool;

use agent_tools::{Tool, ToolRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::api::{ArticleReader, DuckDuckGoClient, FinnhubClient, YahooFinanceClient};
use crate::config::StockConfig;
use crate::error::{Result, StockError};

/// Tool names as seen by the model
pub mod names {
    pub const WEB_SEARCH: &str = "web_search";
    pub const COMPANY_NEWS: &str = "company_news";
    pub const READ_ARTICLE: &str = "read_article";
    pub const STOCK_PRICE: &str = "stock_price";
    pub const TECHNICAL_INDICATORS: &str = "technical_indicators";
    pub const STOCK_FUNDAMENTALS: &str = "stock_fundamentals";
}

const USER_AGENT: &str = concat!("stock-analysis-api/", env!("CARGO_PKG_VERSION"));

/// The full set of tools, built from one configuration
pub struct ToolBox {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolBox {
    /// Build every tool with its data source client
    pub fn new(config: &StockConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(USER_AGENT)
            .build()?;

        let yahoo = YahooFinanceClient::new();
        let finnhub = FinnhubClient::new(
            config.finnhub_api_key.clone(),
            config.finnhub_rate_limit,
            http.clone(),
        );

        let all: [Arc<dyn Tool>; 6] = [
            Arc::new(StockPriceTool::new(yahoo.clone())),
            Arc::new(TechnicalIndicatorsTool::new(yahoo)),
            Arc::new(CompanyNewsTool::new(
                finnhub.clone(),
                config.news_lookback_days,
                config.news_count,
            )),
            Arc::new(StockFundamentalsTool::new(finnhub)),
            Arc::new(WebSearchTool::new(DuckDuckGoClient::new(
                config.search_rate_limit,
                http.clone(),
            )?)),
            Arc::new(ReadArticleTool::new(ArticleReader::new(
                http,
                config.article_max_chars,
            )?)),
        ];

        Ok(Self::from_tools(all))
    }

    /// Wrap an explicit set of tools
    pub fn from_tools(tools: impl IntoIterator<Item = Arc<dyn Tool>>) -> Self {
        let tools = tools
            .into_iter()
            .map(|tool| (tool.name().to_string(), tool))
            .collect();
        Self { tools }
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Registry holding exactly the named tools
    pub fn registry_for(&self, names: &[&str]) -> Result<ToolRegistry> {
        let registry = ToolRegistry::new();
        for name in names {
            let tool = self
                .get(name)
                .ok_or_else(|| StockError::ConfigError(format!("Unknown tool '{name}'")))?;
            registry.register(tool);
        }
        debug!(tools = ?registry.names(), "Built tool registry");
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toolbox_has_every_named_tool() {
        let toolbox = ToolBox::new(&StockConfig::default()).unwrap();
        for name in [
            names::WEB_SEARCH,
            names::COMPANY_NEWS,
            names::READ_ARTICLE,
            names::STOCK_PRICE,
            names::TECHNICAL_INDICATORS,
            names::STOCK_FUNDAMENTALS,
        ] {
            assert_eq!(toolbox.get(name).map(|t| t.name().to_string()).as_deref(), Some(name));
        }
    }

    #[test]
    fn test_registry_for() {
        let toolbox = ToolBox::new(&StockConfig::default()).unwrap();
        let registry = toolbox
            .registry_for(&[names::STOCK_PRICE, names::WEB_SEARCH])
            .unwrap();
        assert_eq!(registry.names(), vec!["stock_price", "web_search"]);

        let Err(err) = toolbox.registry_for(&["stock_data"]) else {
            panic!("unknown tool names must be rejected");
        };
        assert!(err.to_string().contains("Unknown tool 'stock_data'"));
    }
}
