//! Per-request user messages

use super::render;
use crate::error::Result;
use chrono::Utc;
use serde_json::{Value, json};

const MEMBER_TASK: &str = "Stock symbol: {{ symbol }}\nToday's date: {{ today }}";

const COORDINATOR_INPUT: &str = r"Stock symbol: {{ symbol }}

Financial News Specialist result:
{{ news }}

Market Data Analyst result:
{{ price }}

Investment Analyst result:
{{ analysis }}

Combine these into the response object.";

/// Task message sent to each member agent
pub fn render_member_task(symbol: &str) -> Result<String> {
    render(
        MEMBER_TASK,
        json!({
            "symbol": symbol,
            "today": Utc::now().format("%Y-%m-%d").to_string(),
        }),
    )
}

/// Input message for the coordinator carrying the validated member results
pub fn render_coordinator_input(
    symbol: &str,
    news: &Value,
    price: &Value,
    analysis: &Value,
) -> Result<String> {
    render(
        COORDINATOR_INPUT,
        json!({
            "symbol": symbol,
            "news": news.to_string(),
            "price": price.to_string(),
            "analysis": analysis.to_string(),
        }),
    )
}
