//! Tool for calculating technical indicators

use agent_core::Result as AgentResult;
use agent_tools::{Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};
use ta::{
    Next,
    indicators::{ExponentialMovingAverage, RelativeStrengthIndex, SimpleMovingAverage},
};

use super::names;
use crate::api::{Quote, YahooFinanceClient};
use crate::error::{Result, StockError};

/// Calendar days of history fetched, enough for a 200-day average
const HISTORY_DAYS: i64 = 400;

/// Bars used for support, resistance and average volume
const RECENT_WINDOW: usize = 20;

/// Moving averages, RSI, MACD and recent range from daily closes
pub struct TechnicalIndicatorsTool {
    yahoo_client: YahooFinanceClient,
}

impl TechnicalIndicatorsTool {
    /// Create a new technical indicators tool
    pub fn new(yahoo_client: YahooFinanceClient) -> Self {
        Self { yahoo_client }
    }
}

fn indicator_error(e: impl std::fmt::Display) -> StockError {
    StockError::IndicatorError(e.to_string())
}

/// Last value of a simple moving average, `None` with too little history
fn last_sma(closes: &[f64], period: usize) -> Result<Option<f64>> {
    if closes.len() < period {
        return Ok(None);
    }
    let mut sma = SimpleMovingAverage::new(period).map_err(indicator_error)?;
    Ok(closes.iter().fold(None, |_, &c| Some(sma.next(c))))
}

fn last_rsi(closes: &[f64], period: usize) -> Result<Option<f64>> {
    if closes.len() <= period {
        return Ok(None);
    }
    let mut rsi = RelativeStrengthIndex::new(period).map_err(indicator_error)?;
    Ok(closes.iter().fold(None, |_, &c| Some(rsi.next(c))))
}

fn last_macd(closes: &[f64]) -> Result<Option<f64>> {
    if closes.len() < 26 {
        return Ok(None);
    }
    let mut ema12 = ExponentialMovingAverage::new(12).map_err(indicator_error)?;
    let mut ema26 = ExponentialMovingAverage::new(26).map_err(indicator_error)?;
    Ok(closes
        .iter()
        .fold(None, |_, &c| Some(ema12.next(c) - ema26.next(c))))
}

/// Interpret RSI value
fn interpret_rsi(rsi: f64) -> &'static str {
    if rsi > 70.0 {
        "Overbought"
    } else if rsi < 30.0 {
        "Oversold"
    } else {
        "Neutral"
    }
}

fn trend(price: f64, sma50: Option<f64>, sma200: Option<f64>) -> &'static str {
    match (sma50, sma200) {
        (Some(s50), Some(s200)) if price > s50 && s50 > s200 => "Uptrend",
        (Some(s50), Some(s200)) if price < s50 && s50 < s200 => "Downtrend",
        (Some(_), Some(_)) => "Sideways",
        _ => "Undetermined",
    }
}

/// Indicator summary over daily bars, oldest first
fn summarize(symbol: &str, quotes: &[Quote]) -> Result<Value> {
    let Some(latest) = quotes.last() else {
        return Err(StockError::DataUnavailable {
            symbol: symbol.to_string(),
            reason: "No historical data available".to_string(),
        });
    };

    let closes: Vec<f64> = quotes.iter().map(|q| q.close).collect();
    let recent = &quotes[quotes.len().saturating_sub(RECENT_WINDOW)..];

    let sma50 = last_sma(&closes, 50)?;
    let sma200 = last_sma(&closes, 200)?;
    let rsi14 = last_rsi(&closes, 14)?;

    let support = recent.iter().map(|q| q.low).fold(f64::INFINITY, f64::min);
    let resistance = recent.iter().map(|q| q.high).fold(f64::NEG_INFINITY, f64::max);
    let average_volume = recent.iter().map(|q| q.volume as f64).sum::<f64>() / recent.len() as f64;

    Ok(json!({
        "symbol": symbol,
        "as_of": latest.timestamp.format("%Y-%m-%d").to_string(),
        "current_price": latest.close,
        "moving_average_50": sma50,
        "moving_average_200": sma200,
        "rsi_14": rsi14.map(f64::round),
        "rsi_interpretation": rsi14.map(interpret_rsi),
        "macd": last_macd(&closes)?,
        "trend": trend(latest.close, sma50, sma200),
        "support_20d": support,
        "resistance_20d": resistance,
        "latest_volume": latest.volume,
        "average_volume_20d": average_volume.round(),
        "data_points": closes.len(),
    }))
}

#[async_trait]
impl Tool for TechnicalIndicatorsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let symbol = required_str(&params, "symbol")?.to_uppercase();
        let quotes = self
            .yahoo_client
            .get_recent_history(&symbol, HISTORY_DAYS)
            .await?;
        Ok(summarize(&symbol, &quotes)?)
    }

    fn name(&self) -> &'static str {
        names::TECHNICAL_INDICATORS
    }

    fn description(&self) -> &'static str {
        "Calculate technical indicators from daily closes: 50-day and 200-day \
         simple moving averages, 14-day RSI, MACD, trend, 20-day support and \
         resistance, and volume against its 20-day average."
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn bars(closes: &[f64]) -> Vec<Quote> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 21, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Quote {
                symbol: "TEST".to_string(),
                timestamp: start + Duration::days(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1_000,
                adjclose: close,
            })
            .collect()
    }

    #[test]
    fn test_interpret_rsi() {
        assert_eq!(interpret_rsi(75.0), "Overbought");
        assert_eq!(interpret_rsi(25.0), "Oversold");
        assert_eq!(interpret_rsi(50.0), "Neutral");
    }

    #[test]
    fn test_summary_of_rising_series() {
        let closes: Vec<f64> = (1..=250).map(f64::from).collect();
        let summary = summarize("TEST", &bars(&closes)).unwrap();

        // mean of 201..=250 and 51..=250
        assert_eq!(summary["moving_average_50"], json!(225.5));
        assert_eq!(summary["moving_average_200"], json!(150.5));
        assert_eq!(summary["rsi_14"], json!(100.0));
        assert_eq!(summary["trend"], "Uptrend");
        assert_eq!(summary["support_20d"], json!(230.0));
        assert_eq!(summary["resistance_20d"], json!(251.0));
        assert_eq!(summary["average_volume_20d"], json!(1000.0));
        assert_eq!(summary["data_points"], 250);
    }

    #[test]
    fn test_short_history_leaves_long_averages_empty() {
        let closes: Vec<f64> = (1..=60).map(f64::from).collect();
        let summary = summarize("TEST", &bars(&closes)).unwrap();

        assert!(summary["moving_average_50"].is_number());
        assert!(summary["moving_average_200"].is_null());
        assert_eq!(summary["trend"], "Undetermined");
    }

    #[test]
    fn test_empty_history() {
        assert!(matches!(
            summarize("TEST", &[]),
            Err(StockError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = TechnicalIndicatorsTool::new(YahooFinanceClient::new());
        assert_eq!(tool.name(), "technical_indicators");
        assert_eq!(tool.input_schema()["type"], "object");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_execute() {
        let tool = TechnicalIndicatorsTool::new(YahooFinanceClient::new());
        let data = tool.execute(json!({"symbol": "MSFT"})).await.unwrap();
        assert!(data["moving_average_200"].is_number());
    }
}
