//! Tool for fetching recent company news

use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::HashSet;

use super::names;
use crate::api::{FinnhubClient, FinnhubNewsArticle};

/// Company news from Finnhub over a lookback window
pub struct CompanyNewsTool {
    client: FinnhubClient,
    lookback_days: i64,
    default_limit: usize,
}

#[derive(Debug, Deserialize)]
struct NewsParams {
    symbol: String,
    #[serde(default)]
    limit: Option<usize>,
}

impl CompanyNewsTool {
    /// Create a new company news tool
    pub fn new(client: FinnhubClient, lookback_days: i64, default_limit: usize) -> Self {
        Self {
            client,
            lookback_days,
            default_limit,
        }
    }
}

/// Newest first, one entry per URL, dates as YYYY-MM-DD
fn articles_json(mut articles: Vec<FinnhubNewsArticle>, limit: usize) -> Vec<Value> {
    articles.sort_by(|a, b| b.datetime.cmp(&a.datetime));
    let mut seen = HashSet::new();

    articles
        .into_iter()
        .filter(|a| !a.headline.trim().is_empty() && a.url.starts_with("http"))
        .filter(|a| seen.insert(a.url.clone()))
        .take(limit)
        .map(|a| {
            let date = DateTime::from_timestamp(a.datetime, 0)
                .map(|d| d.format("%Y-%m-%d").to_string());
            json!({
                "headline": a.headline,
                "source": a.source,
                "url": a.url,
                "date": date,
                "summary": a.summary,
            })
        })
        .collect()
}

#[async_trait]
impl Tool for CompanyNewsTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: NewsParams = serde_json::from_value(params).map_err(|e| {
            agent_core::Error::ProcessingFailed(format!("Invalid parameters: {e}"))
        })?;
        let symbol = params.symbol.trim().to_uppercase();
        let limit = params.limit.unwrap_or(self.default_limit).max(1);

        let to = Utc::now();
        let from = to - Duration::days(self.lookback_days);
        let articles = self
            .client
            .get_company_news(
                &symbol,
                &from.format("%Y-%m-%d").to_string(),
                &to.format("%Y-%m-%d").to_string(),
            )
            .await?;

        let total = articles.len();
        Ok(json!({
            "symbol": symbol,
            "articles": articles_json(articles, limit),
            "total_found": total,
        }))
    }

    fn name(&self) -> &'static str {
        names::COMPANY_NEWS
    }

    fn description(&self) -> &'static str {
        "Fetch the most recent news articles about a company, newest first, \
         with headline, source, full URL and publication date (YYYY-MM-DD)."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "symbol": {
                    "type": "string",
                    "description": "Stock ticker symbol"
                },
                "limit": {
                    "type": "integer",
                    "description": "Maximum number of articles to return",
                    "minimum": 1
                }
            },
            "required": ["symbol"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(datetime: i64, url: &str) -> FinnhubNewsArticle {
        FinnhubNewsArticle {
            category: "company".to_string(),
            datetime,
            headline: format!("Headline {datetime}"),
            id: datetime,
            related: "AAPL".to_string(),
            source: "Reuters".to_string(),
            summary: String::new(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_articles_sorted_deduped_and_limited() {
        let articles = vec![
            article(1_722_470_400, "https://a.test/1"), // 2024-08-01
            article(1_722_556_800, "https://a.test/2"), // 2024-08-02
            article(1_722_556_800, "https://a.test/2"),
            article(1_722_384_000, "ftp://a.test/3"),
            article(1_722_211_200, "https://a.test/4"),
        ];

        let json = articles_json(articles, 2);
        assert_eq!(json.len(), 2);
        assert_eq!(json[0]["url"], "https://a.test/2");
        assert_eq!(json[0]["date"], "2024-08-02");
        assert_eq!(json[1]["date"], "2024-08-01");
    }

    #[test]
    fn test_repeated_url_keeps_newest_copy() {
        let articles = vec![
            article(1_722_643_200, "https://a.test/x"),
            article(1_722_556_800, "https://b.test/y"),
            article(1_722_470_400, "https://a.test/x"),
        ];

        let json = articles_json(articles, 10);
        let urls: Vec<_> = json.iter().map(|a| a["url"].as_str().unwrap()).collect();
        assert_eq!(urls, vec!["https://a.test/x", "https://b.test/y"]);
        assert_eq!(json[0]["date"], "2024-08-03");
    }

    #[tokio::test]
    async fn test_invalid_parameters() {
        let tool = CompanyNewsTool::new(
            FinnhubClient::new(None, 60, reqwest::Client::new()),
            30,
            5,
        );
        let err = tool.execute(json!({"limit": 3})).await.unwrap_err();
        assert!(err.to_string().contains("Invalid parameters"));
    }

    #[tokio::test]
    async fn test_missing_key_is_reported() {
        let tool = CompanyNewsTool::new(
            FinnhubClient::new(None, 60, reqwest::Client::new()),
            30,
            5,
        );
        let err = tool.execute(json!({"symbol": "AAPL"})).await.unwrap_err();
        assert!(err.to_string().contains("FINNHUB_API_KEY"));
    }
}
