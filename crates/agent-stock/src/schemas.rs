//! Response shapes produced by the agents and returned by the API
//!
//! Every field is required. Field names are the wire names, except for the
//! two `Description` fields which keep their capitalised wire spelling.

use crate::error::{Result, StockError};
use agent_llm::tools::schema;
use chrono::NaiveDate;
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Number, Value, json};
use url::Url;

/// A shape an agent must answer with
///
/// The JSON schema is rendered into the agent's instructions; `from_value`
/// is how the agent's answer is checked.
pub trait OutputShape: Serialize + DeserializeOwned {
    /// Shape name used in prompts and error messages
    const NAME: &'static str;

    /// JSON schema of the shape
    fn json_schema() -> Value;

    /// Checks serde cannot express
    fn validate(&self) -> Result<()> {
        Ok(())
    }

    /// Deserialize and validate a JSON value
    fn from_value(value: Value) -> Result<Self> {
        let parsed: Self = serde_json::from_value(value)
            .map_err(|e| StockError::Schema(format!("{}: {e}", Self::NAME)))?;
        parsed.validate()?;
        Ok(parsed)
    }
}

/// A single news article about the stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialNews {
    pub headline: String,
    pub source: String,
    /// Absolute http(s) URL of the article
    pub url: String,
    /// Publication date, `YYYY-MM-DD`
    pub date: String,
}

impl FinancialNews {
    fn check(&self) -> Result<()> {
        let parsed = Url::parse(&self.url)
            .map_err(|e| StockError::Schema(format!("invalid news url '{}': {e}", self.url)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(StockError::Schema(format!(
                "news url '{}' is not an absolute http(s) link",
                self.url
            )));
        }

        if self.date.len() != 10 || NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(StockError::Schema(format!(
                "news date '{}' is not in YYYY-MM-DD format",
                self.date
            )));
        }

        Ok(())
    }

    fn schema() -> Value {
        schema::object(
            json!({
                "headline": schema::string("Complete, unmodified article title"),
                "source": schema::string("Publisher name"),
                "url": schema::formatted_string("Full article URL starting with http:// or https://", "uri"),
                "date": schema::formatted_string("Publication date as YYYY-MM-DD", "date"),
            }),
            &["headline", "source", "url", "date"],
        )
    }
}

/// Output of the news agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllFinancialNews {
    pub financial_news: Vec<FinancialNews>,
}

impl OutputShape for AllFinancialNews {
    const NAME: &'static str = "AllFinancialNews";

    fn json_schema() -> Value {
        schema::object(
            json!({
                "financial_news": schema::array("Recent news articles", FinancialNews::schema()),
            }),
            &["financial_news"],
        )
    }

    fn validate(&self) -> Result<()> {
        self.financial_news.iter().try_for_each(FinancialNews::check)
    }
}

/// Latest market data for the stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceData {
    pub symbol: String,
    pub last_price: f64,
    pub high: f64,
    pub low: f64,
    #[serde(deserialize_with = "whole_u64")]
    pub volume: u64,
    pub timestamp: String,
}

impl OutputShape for PriceData {
    const NAME: &'static str = "PriceData";

    fn json_schema() -> Value {
        schema::object(
            json!({
                "symbol": schema::string("Ticker symbol"),
                "last_price": schema::number("Latest traded price"),
                "high": schema::number("Session high"),
                "low": schema::number("Session low"),
                "volume": schema::integer("Shares traded in the session"),
                "timestamp": schema::string("When the quote was taken, ISO 8601"),
            }),
            &["symbol", "last_price", "high", "low", "volume", "timestamp"],
        )
    }
}

/// Technical indicators with a written assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalAnalysis {
    pub moving_average_50: f64,
    pub moving_average_200: f64,
    #[serde(deserialize_with = "whole_i64")]
    pub rsi: i64,
    #[serde(rename = "Description")]
    pub description: String,
    pub recommendations: String,
}

impl TechnicalAnalysis {
    fn schema() -> Value {
        schema::object(
            json!({
                "moving_average_50": schema::number("50-day simple moving average"),
                "moving_average_200": schema::number("200-day simple moving average"),
                "rsi": schema::integer("14-day relative strength index, rounded"),
                "Description": schema::string("Trend, support/resistance and volume assessment"),
                "recommendations": schema::string("Buy, hold or sell with price targets"),
            }),
            &[
                "moving_average_50",
                "moving_average_200",
                "rsi",
                "Description",
                "recommendations",
            ],
        )
    }
}

/// Fundamental ratios with a written assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalAnalysis {
    pub pe_ratio: f64,
    pub eps: f64,
    pub revenue_growth: f64,
    pub debt_to_equity: f64,
    #[serde(rename = "Description")]
    pub description: String,
    pub recommendations: String,
}

impl FundamentalAnalysis {
    fn schema() -> Value {
        schema::object(
            json!({
                "pe_ratio": schema::number("Price to earnings ratio"),
                "eps": schema::number("Earnings per share"),
                "revenue_growth": schema::number("Year over year revenue growth, percent"),
                "debt_to_equity": schema::number("Total debt to equity"),
                "Description": schema::string("Growth, ratio and competitive position assessment"),
                "recommendations": schema::string("Buy, hold or sell with risks"),
            }),
            &[
                "pe_ratio",
                "eps",
                "revenue_growth",
                "debt_to_equity",
                "Description",
                "recommendations",
            ],
        )
    }
}

/// Output of the analysis agent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub technical: TechnicalAnalysis,
    pub fundamental: FundamentalAnalysis,
}

impl OutputShape for Analysis {
    const NAME: &'static str = "Analysis";

    fn json_schema() -> Value {
        schema::object(
            json!({
                "technical": TechnicalAnalysis::schema(),
                "fundamental": FundamentalAnalysis::schema(),
            }),
            &["technical", "fundamental"],
        )
    }
}

/// Everything known about one stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockData {
    pub financial_news: Vec<FinancialNews>,
    pub price_data: PriceData,
    pub analysis: Analysis,
}

/// Envelope returned by `GET /api/v1/stock/{symbol}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnifiedResponse {
    pub stock_data: StockData,
}

impl UnifiedResponse {
    /// Build a response from a loosely typed mapping, validating every field
    pub fn from_mapping(value: Value) -> Result<Self> {
        <Self as OutputShape>::from_value(value)
    }

    /// Validate news links and dates
    pub fn validate(&self) -> Result<()> {
        <Self as OutputShape>::validate(self)
    }
}

impl OutputShape for UnifiedResponse {
    const NAME: &'static str = "UnifiedResponse";

    fn json_schema() -> Value {
        schema::object(
            json!({
                "stock_data": schema::object(
                    json!({
                        "financial_news": schema::array("Recent news articles", FinancialNews::schema()),
                        "price_data": PriceData::json_schema(),
                        "analysis": Analysis::json_schema(),
                    }),
                    &["financial_news", "price_data", "analysis"],
                ),
            }),
            &["stock_data"],
        )
    }

    fn validate(&self) -> Result<()> {
        self.stock_data
            .financial_news
            .iter()
            .try_for_each(FinancialNews::check)
    }
}

fn whole_i64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<i64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_i64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => Ok(f as i64),
        _ => Err(D::Error::custom(format!("expected an integer, got {number}"))),
    }
}

fn whole_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    let number = Number::deserialize(deserializer)?;
    if let Some(n) = number.as_u64() {
        return Ok(n);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && (0.0..9.0e15).contains(&f) => Ok(f as u64),
        _ => Err(D::Error::custom(format!(
            "expected a non-negative integer, got {number}"
        ))),
    }
}
