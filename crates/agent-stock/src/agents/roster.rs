//! The agents behind a stock analysis request

use super::spec::{AgentSpec, OutputKind};
use crate::config::StockConfig;
use crate::tools::names;

/// Collects recent news articles about the stock
pub fn news_agent(config: &StockConfig) -> AgentSpec {
    let count = config.news_count;
    AgentSpec {
        id: "news-agent",
        name: "Financial News Specialist",
        role: "Track and analyze the latest financial news about a stock",
        instructions: vec![
            format!(
                "Find the {count} most recent news articles that are relevant to the stock symbol."
            ),
            "Start with company_news, then use web_search to fill gaps.".to_string(),
            "Use read_article when a headline, source or date needs confirming.".to_string(),
            "Keep each headline exactly as published.".to_string(),
            "Give the full article URL including scheme, path and query string. Never shorten or invent a URL."
                .to_string(),
            "Write each publication date as YYYY-MM-DD.".to_string(),
            format!(
                "Prefer articles from the last {} days.",
                config.news_lookback_days
            ),
            format!("Return exactly {count} articles when that many exist."),
        ],
        tools: vec![names::COMPANY_NEWS, names::WEB_SEARCH, names::READ_ARTICLE],
        output: OutputKind::News,
        reports_errors: true,
    }
}

/// Fetches the latest market data
pub fn price_agent(_config: &StockConfig) -> AgentSpec {
    AgentSpec {
        id: "price-agent",
        name: "Market Data Analyst",
        role: "Track real-time market data for a stock",
        instructions: vec![
            "Call stock_price for the symbol.".to_string(),
            "Report the latest price, the session high and low, and the traded volume.".to_string(),
            "Copy numbers from the tool result without rounding.".to_string(),
            "Use the quote time from the tool result as the timestamp.".to_string(),
        ],
        tools: vec![names::STOCK_PRICE],
        output: OutputKind::Price,
        reports_errors: true,
    }
}

/// Produces the technical and fundamental analysis
pub fn analysis_agent(_config: &StockConfig) -> AgentSpec {
    AgentSpec {
        id: "analysis-agent",
        name: "Investment Analyst",
        role: "Provide a technical and fundamental analysis of a stock",
        instructions: vec![
            "Call technical_indicators for the 50-day and 200-day moving averages and the 14-day RSI."
                .to_string(),
            "Describe price trend, support and resistance levels, and volume in the technical Description."
                .to_string(),
            "Call stock_fundamentals for P/E, EPS, revenue growth and debt to equity.".to_string(),
            "Use web_search for competitive position and industry context.".to_string(),
            "Cover market, company and industry risks.".to_string(),
            "Give a clear buy, hold or sell recommendation with specific price targets.".to_string(),
            "Round the RSI to a whole number.".to_string(),
        ],
        tools: vec![
            names::STOCK_PRICE,
            names::TECHNICAL_INDICATORS,
            names::STOCK_FUNDAMENTALS,
            names::WEB_SEARCH,
        ],
        output: OutputKind::Analysis,
        reports_errors: true,
    }
}

/// Merges the three member results into the final response
pub fn coordinator(_config: &StockConfig) -> AgentSpec {
    AgentSpec {
        id: "coordinator",
        name: "Research Coordinator",
        role: "Combine the findings of the news, market data and analysis specialists",
        instructions: vec![
            "You receive the validated results of three specialists for one stock symbol.".to_string(),
            "Place the news articles under stock_data.financial_news.".to_string(),
            "Place the market data under stock_data.price_data.".to_string(),
            "Place the technical and fundamental analysis under stock_data.analysis.".to_string(),
            "Keep every value and URL exactly as given. Do not add or drop articles.".to_string(),
        ],
        tools: Vec::new(),
        output: OutputKind::Unified,
        reports_errors: false,
    }
}

/// The three member agents, in the order their results are merged
pub fn members(config: &StockConfig) -> [AgentSpec; 3] {
    [
        news_agent(config),
        price_agent(config),
        analysis_agent(config),
    ]
}
