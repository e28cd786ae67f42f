//! Tool for fetching fundamental metrics

use agent_core::Result as AgentResult;
use agent_tools::{Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};

use super::names;
use crate::api::{BasicFinancials, FinnhubClient};

/// Valuation, earnings, growth and leverage metrics from Finnhub
pub struct StockFundamentalsTool {
    client: FinnhubClient,
}

impl StockFundamentalsTool {
    /// Create a new fundamentals tool
    pub fn new(client: FinnhubClient) -> Self {
        Self { client }
    }
}

fn fundamentals_json(symbol: &str, f: &BasicFinancials) -> Value {
    json!({
        "symbol": symbol,
        "pe_ratio": f.first_of(&["peTTM", "peBasicExclExtraTTM", "peAnnual"]),
        "eps": f.first_of(&["epsTTM", "epsBasicExclExtraItemsTTM", "epsAnnual"]),
        // percent
        "revenue_growth": f.first_of(&["revenueGrowthTTMYoy", "revenueGrowthQuarterlyYoy", "revenueGrowth5Y"]),
        "debt_to_equity": f.first_of(&["totalDebt/totalEquityQuarterly", "totalDebt/totalEquityAnnual"]),
        "market_cap_millions": f.first_of(&["marketCapitalization"]),
        "net_margin": f.first_of(&["netProfitMarginTTM", "netProfitMarginAnnual"]),
        "roe": f.first_of(&["roeTTM", "roeRfy"]),
        "dividend_yield": f.first_of(&["currentDividendYieldTTM", "dividendYieldIndicatedAnnual"]),
        "week_52_high": f.first_of(&["52WeekHigh"]),
        "week_52_low": f.first_of(&["52WeekLow"]),
        "beta": f.first_of(&["beta"]),
    })
}

#[async_trait]
impl Tool for StockFundamentalsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = required_str(&params, "symbol")?.to_uppercase();
        let financials = self.client.get_basic_financials(&symbol).await?;
        Ok(fundamentals_json(&symbol, &financials))
    }

    fn name(&self) -> &'static str {
        names::STOCK_FUNDAMENTALS
    }

    fn description(&self) -> &'static str {
        "Fetch fundamental metrics for a stock: P/E ratio, EPS, revenue growth (percent), \
         debt to equity, market cap, margins, dividend yield, 52-week range and beta. \
         Missing metrics are null."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                }
            },
            "required": ["symbol"]
        })
    }
}
