//! Yahoo Finance API client

use crate::error::{Result, StockError};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;
use yahoo_finance_api as yahoo;

/// Yahoo Finance API client
#[derive(Debug, Clone, Default)]
pub struct YahooFinanceClient {}

/// One daily bar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
    pub adjclose: f64,
}

impl Quote {
    fn from_yahoo(symbol: &str, quote: &yahoo::Quote) -> Self {
        Self {
            symbol: symbol.to_string(),
            timestamp: DateTime::from_timestamp(quote.timestamp as i64, 0)
                .unwrap_or_else(Utc::now),
            open: quote.open,
            high: quote.high,
            low: quote.low,
            close: quote.close,
            volume: quote.volume,
            adjclose: quote.adjclose,
        }
    }
}

impl YahooFinanceClient {
    /// Create a new Yahoo Finance client
    pub fn new() -> Self {
        Self {}
    }

    fn connector() -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::new().map_err(|e| StockError::YahooFinanceError(e.to_string()))
    }

    /// Get the latest daily bar for a symbol
    ///
    /// A symbol Yahoo has no chart for is reported as `SymbolNotFound`.
    pub async fn get_quote(&self, symbol: &str) -> Result<Quote> {
        debug!(symbol, "Fetching latest quote");
        let response = Self::connector()?
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| classify(symbol, &e.to_string()))?;

        let quote = response
            .last_quote()
            .map_err(|_| StockError::SymbolNotFound(symbol.to_string()))?;

        Ok(Quote::from_yahoo(symbol, &quote))
    }

    /// Get daily bars between two instants
    pub async fn get_historical_quotes(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Quote>> {
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| StockError::YahooFinanceError(format!("Invalid end timestamp: {e}")))?;

        let response = Self::connector()?
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| classify(symbol, &e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|_| StockError::SymbolNotFound(symbol.to_string()))?;

        if quotes.is_empty() {
            return Err(StockError::SymbolNotFound(symbol.to_string()));
        }

        Ok(quotes.iter().map(|q| Quote::from_yahoo(symbol, q)).collect())
    }

    /// Get the daily bars of the last `days` calendar days
    pub async fn get_recent_history(&self, symbol: &str, days: i64) -> Result<Vec<Quote>> {
        let end = Utc::now();
        self.get_historical_quotes(symbol, end - Duration::days(days), end)
            .await
    }
}

/// Yahoo answers unknown tickers with a 404 or a "No data found" chart error
fn classify(symbol: &str, message: &str) -> StockError {
    let lower = message.to_ascii_lowercase();
    if lower.contains("404")
        || lower.contains("not found")
        || lower.contains("no data found")
        || lower.contains("delisted")
    {
        StockError::SymbolNotFound(symbol.to_string())
    } else {
        StockError::YahooFinanceError(message.to_string())
    }
}
