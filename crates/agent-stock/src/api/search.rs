//! DuckDuckGo web search client

use super::html::{HtmlText, compile, decode_entities};
use crate::error::{Result, StockError};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::debug;
use url::Url;

type SharedRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

const SEARCH_URL: &str = "https://html.duckduckgo.com/html/";

/// One search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub url: String,
    pub snippet: String,
}

/// DuckDuckGo client using the HTML endpoint
#[derive(Clone)]
pub struct DuckDuckGoClient {
    client: Client,
    rate_limiter: SharedRateLimiter,
    link: Regex,
    snippet: Regex,
    html: HtmlText,
}

impl DuckDuckGoClient {
    /// Create a new search client
    ///
    /// # Arguments
    /// * `rate_limit` - Requests per minute
    /// * `client` - HTTP client
    pub fn new(rate_limit: u32, client: Client) -> Result<Self> {
        let quota = Quota::per_minute(NonZeroU32::new(rate_limit).unwrap_or(NonZeroU32::MIN));

        Ok(Self {
            client,
            rate_limiter: Arc::new(RateLimiter::direct(quota)),
            link: compile(r#"(?s)<a[^>]*class="result__a"[^>]*href="([^"]+)"[^>]*>(.*?)</a>"#)?,
            snippet: compile(r#"(?s)class="result__snippet"[^>]*>(.*?)</a>"#)?,
            html: HtmlText::new()?,
        })
    }

    /// Search the web, returning at most `max_results` hits
    pub async fn search(&self, query: &str, max_results: usize) -> Result<Vec<SearchResult>> {
        self.rate_limiter.until_ready().await;
        debug!(query, "Web search");

        let response = self
            .client
            .post(SEARCH_URL)
            .form(&[("q", query)])
            .send()
            .await
            .map_err(|e| StockError::ApiError(format!("Search request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StockError::ApiError(format!(
                "Search failed with status {}",
                response.status()
            )));
        }

        let body = response.text().await?;
        Ok(self.parse_results(&body, max_results))
    }

    /// Extract hits from a result page
    pub fn parse_results(&self, page: &str, max_results: usize) -> Vec<SearchResult> {
        let snippets: Vec<String> = self
            .snippet
            .captures_iter(page)
            .map(|c| self.html.to_text(&c[1]))
            .collect();

        self.link
            .captures_iter(page)
            .filter_map(|c| {
                let url = resolve_link(&decode_entities(&c[1]))?;
                Some((url, self.html.to_text(&c[2])))
            })
            .enumerate()
            .map(|(i, (url, title))| SearchResult {
                title,
                url,
                snippet: snippets.get(i).cloned().unwrap_or_default(),
            })
            .take(max_results)
            .collect()
    }
}

/// Result links are redirects carrying the target in `uddg`
fn resolve_link(href: &str) -> Option<String> {
    let absolute = if href.starts_with("//") {
        format!("https:{href}")
    } else {
        href.to_string()
    };
    let parsed = Url::parse(&absolute).ok()?;

    if parsed.host_str().is_some_and(|h| h.ends_with("duckduckgo.com")) {
        return parsed
            .query_pairs()
            .find(|(k, _)| k == "uddg")
            .map(|(_, v)| v.into_owned());
    }
    Some(absolute)
}
