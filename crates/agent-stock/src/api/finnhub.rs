//! Finnhub client for company news and basic financials

use crate::error::{Result, StockError};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const FINNHUB_API_BASE: &str = "https://finnhub.io/api/v1";

/// Finnhub news article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinnhubNewsArticle {
    /// Article category
    #[serde(default)]
    pub category: String,
    /// Publish time (UNIX timestamp)
    pub datetime: i64,
    /// News headline
    pub headline: String,
    /// Unique article ID
    #[serde(default)]
    pub id: i64,
    /// Related symbols
    #[serde(default)]
    pub related: String,
    /// News source
    pub source: String,
    /// Article summary
    #[serde(default)]
    pub summary: String,
    /// Article URL
    pub url: String,
}

/// Response of the `stock/metric` endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BasicFinancials {
    #[serde(default)]
    pub symbol: String,
    /// Metric name to value, e.g. `peTTM`, `epsTTM`
    #[serde(default)]
    pub metric: Map<String, Value>,
}

impl BasicFinancials {
    /// First numeric metric among `keys`
    pub fn first_of(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .find_map(|key| self.metric.get(*key).and_then(Value::as_f64))
    }
}

/// Finnhub client with client-side rate limiting
#[derive(Clone)]
pub struct FinnhubClient {
    client: Client,
    api_key: Option<String>,
    rate_limiter: SharedRateLimiter,
}

impl FinnhubClient {
    /// Create a new Finnhub client
    ///
    /// # Arguments
    /// * `api_key` - Finnhub API key, requests fail without one
    /// * `rate_limit` - Requests per minute (free tier: 60)
    /// * `client` - HTTP client, shared with the other data sources
    pub fn new(api_key: Option<String>, rate_limit: u32, client: Client) -> Self {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Self {
            client,
            api_key,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Get company news for a symbol
    ///
    /// # Arguments
    /// * `symbol` - Stock symbol (e.g., "AAPL")
    /// * `from` - Start date (YYYY-MM-DD)
    /// * `to` - End date (YYYY-MM-DD)
    pub async fn get_company_news(
        &self,
        symbol: &str,
        from: &str,
        to: &str,
    ) -> Result<Vec<FinnhubNewsArticle>> {
        self.get("company-news", &[("symbol", symbol), ("from", from), ("to", to)])
            .await
    }

    /// Get basic financials (valuation, profitability, growth) for a symbol
    pub async fn get_basic_financials(&self, symbol: &str) -> Result<BasicFinancials> {
        self.get("stock/metric", &[("symbol", symbol), ("metric", "all")])
            .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| StockError::ConfigError("FINNHUB_API_KEY is not set".to_string()))?;

        self.rate_limiter.until_ready().await;
        debug!(path, "Finnhub request");

        let response = self
            .client
            .get(format!("{FINNHUB_API_BASE}/{path}"))
            .query(query)
            .query(&[("token", api_key)])
            .send()
            .await
            .map_err(|e| StockError::ApiError(format!("Finnhub request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StockError::ApiError(format!(
                "Finnhub API error {status}: {body}"
            )));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| StockError::ApiError(format!("Failed to parse Finnhub response: {e}")))
    }
}
