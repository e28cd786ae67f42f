//! Tool for fetching the latest market data of a stock

use agent_core::Result as AgentResult;
use agent_tools::{Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};

use super::names;
use crate::api::{Quote, YahooFinanceClient};
use crate::error::StockError;

/// Latest price, session range and volume
pub struct StockPriceTool {
    yahoo_client: YahooFinanceClient,
}

impl StockPriceTool {
    /// Create a new stock price tool
    pub fn new(yahoo_client: YahooFinanceClient) -> Self {
        Self { yahoo_client }
    }
}

fn quote_json(quote: &Quote) -> Value {
    json!({
        "symbol": quote.symbol,
        "last_price": quote.close,
        "open": quote.open,
        "high": quote.high,
        "low": quote.low,
        "volume": quote.volume,
        "timestamp": quote.timestamp.to_rfc3339(),
    })
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = required_str(&params, "symbol")?.to_uppercase();
        let quote = self
            .yahoo_client
            .get_quote(&symbol)
            .await
            .map_err(|e| match e {
                StockError::SymbolNotFound(what) => agent_core::Error::NotFound(what),
                other => other.into(),
            })?;
        Ok(quote_json(&quote))
    }

    fn name(&self) -> &'static str {
        names::STOCK_PRICE
    }

    fn description(&self) -> &'static str {
        "Fetch the latest market data for a stock symbol: last price, \
         session open, high and low, traded volume and the quote time."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol (e.g., 'AAPL', 'GOOGL')"
                }
            },
            "required": ["symbol"]
        })
    }
}
