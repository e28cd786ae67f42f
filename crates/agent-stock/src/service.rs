//! Stock service: the boundary between the HTTP layer and the agents

use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::error::{ErrorCategory, Result, StockError};
use crate::orchestrator::{AnalysisPayload, StockAnalyzer};
use crate::schemas::UnifiedResponse;

/// Returns validated stock data for a symbol
#[derive(Clone)]
pub struct StockService {
    analyzer: Arc<dyn StockAnalyzer>,
}

impl StockService {
    pub fn new(analyzer: Arc<dyn StockAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Analyze `symbol` and return a response of the unified shape
    ///
    /// Invalid-symbol and not-found failures are returned as they are. Any
    /// other failure is wrapped with the symbol it occurred for.
    pub async fn get_stock_data(&self, symbol: &str) -> Result<UnifiedResponse> {
        info!(symbol, "Getting stock data");

        let outcome = match self.analyzer.analyze(symbol).await {
            Ok(AnalysisPayload::Unified(response)) => response.validate().map(|()| response),
            Ok(AnalysisPayload::Mapping(mapping)) => UnifiedResponse::from_mapping(mapping),
            Err(e) => Err(e),
        };

        outcome.map_err(|e| {
            error!(symbol, error = %e, "Error getting stock data");
            match e.category() {
                ErrorCategory::InvalidArgument | ErrorCategory::NotFound => e,
                ErrorCategory::Internal => {
                    StockError::Analysis(format!("Error getting stock data for {symbol}: {e}"))
                }
            }
        })
    }

    /// Parse an agent's text answer, stripping a Markdown code fence
    pub fn clean_json_response(raw: &str) -> Result<Value> {
        clean_json_response(raw)
    }
}

/// Parse `raw` as JSON after removing a surrounding ```` ``` ```` fence
/// (with or without a language tag)
pub fn clean_json_response(raw: &str) -> Result<Value> {
    let text = strip_fence(raw.trim());
    serde_json::from_str(text).map_err(|e| StockError::InvalidJson(format!("Invalid JSON: {e}")))
}

fn strip_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.trim_end();
    let rest = rest.strip_suffix("```").unwrap_or(rest);

    // drop the language tag, on its own line or not
    if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        let body =
            rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !body.trim().is_empty() {
            return body.trim();
        }
    }
    rest.trim()
}
