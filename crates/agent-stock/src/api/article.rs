//! Fetches news articles and reduces them to their text

use super::html::{HtmlText, compile, decode_entities, truncate_chars};
use crate::error::{Result, StockError};
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;
use url::Url;

/// A fetched article
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    /// Final URL after redirects
    pub url: String,
    pub title: Option<String>,
    /// Publication time as found in the page metadata
    pub published: Option<String>,
    pub site_name: Option<String>,
    pub text: String,
    pub truncated: bool,
}

/// Article fetcher
#[derive(Clone)]
pub struct ArticleReader {
    client: Client,
    max_chars: usize,
    title: Regex,
    meta: Regex,
    html: HtmlText,
}

impl ArticleReader {
    /// Create a reader that keeps at most `max_chars` characters of text
    pub fn new(client: Client, max_chars: usize) -> Result<Self> {
        Ok(Self {
            client,
            max_chars,
            title: compile(r"(?is)<title[^>]*>(.*?)</title>")?,
            meta: compile(r#"(?is)<meta\s+[^>]*(?:property|name|itemprop)="([^"]+)"[^>]*content="([^"]*)"[^>]*>"#)?,
            html: HtmlText::new()?,
        })
    }

    /// Download and extract the article at `url`
    pub async fn read(&self, url: &str) -> Result<Article> {
        let parsed = Url::parse(url)
            .map_err(|e| StockError::ApiError(format!("Invalid article URL '{url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(StockError::ApiError(format!(
                "Unsupported URL scheme: {}",
                parsed.scheme()
            )));
        }

        debug!(%parsed, "Fetching article");
        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| StockError::ApiError(format!("Article request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(StockError::ApiError(format!(
                "Article request failed with status {}",
                response.status()
            )));
        }

        let final_url = response.url().to_string();
        let body = response.text().await?;
        Ok(self.extract(&final_url, &body))
    }

    /// Pull title, metadata and text out of a page
    pub fn extract(&self, url: &str, page: &str) -> Article {
        let meta = |keys: &[&str]| -> Option<String> {
            self.meta
                .captures_iter(page)
                .find(|c| keys.iter().any(|k| c[1].eq_ignore_ascii_case(k)))
                .map(|c| decode_entities(c[2].trim()))
                .filter(|v| !v.is_empty())
        };

        let title = meta(&["og:title", "twitter:title"]).or_else(|| {
            self.title
                .captures(page)
                .map(|c| self.html.to_text(&c[1]))
                .filter(|t| !t.is_empty())
        });

        let text = self.html.to_text(page);
        let (kept, truncated) = truncate_chars(&text, self.max_chars);

        Article {
            url: url.to_string(),
            title,
            published: meta(&["article:published_time", "datePublished", "pubdate", "date"]),
            site_name: meta(&["og:site_name"]),
            text: kept.to_string(),
            truncated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><head>
<title>Ignored | Site</title>
<meta property="og:title" content="Apple tops estimates &amp; raises buyback">
<meta property="og:site_name" content="Reuters">
<meta property="article:published_time" content="2024-08-01T20:31:00Z">
</head><body><article><p>Apple reported revenue of $85.8 billion.</p></article></body></html>"#;

    #[test]
    fn test_extract_metadata() {
        let reader = ArticleReader::new(Client::new(), 4000).unwrap();
        let article = reader.extract("https://www.reuters.com/a", PAGE);

        assert_eq!(article.title.as_deref(), Some("Apple tops estimates & raises buyback"));
        assert_eq!(article.site_name.as_deref(), Some("Reuters"));
        assert_eq!(article.published.as_deref(), Some("2024-08-01T20:31:00Z"));
        assert!(article.text.ends_with("Apple reported revenue of $85.8 billion."));
        assert!(!article.truncated);
    }

    #[test]
    fn test_extract_falls_back_to_title_tag_and_truncates() {
        let reader = ArticleReader::new(Client::new(), 10).unwrap();
        let article = reader.extract(
            "https://example.com",
            "<title>Plain page</title><p>abcdefghijklmnop</p>",
        );

        assert_eq!(article.title.as_deref(), Some("Plain page"));
        assert_eq!(article.text.chars().count(), 10);
        assert!(article.truncated);
        assert!(article.published.is_none());
    }

    #[tokio::test]
    async fn test_read_rejects_non_http_urls() {
        let reader = ArticleReader::new(Client::new(), 100).unwrap();
        assert!(reader.read("ftp://example.com/file").await.is_err());
        assert!(reader.read("not a url").await.is_err());
    }
}
