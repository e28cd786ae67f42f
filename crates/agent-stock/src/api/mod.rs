//! API clients for market data, news and web content

pub mod article;
pub mod finnhub;
pub mod html;
pub mod search;
pub mod yahoo;

pub use article::{Article, ArticleReader};
pub use finnhub::{BasicFinancials, FinnhubClient, FinnhubNewsArticle};
pub use search::{DuckDuckGoClient, SearchResult};
pub use yahoo::{Quote, YahooFinanceClient};
