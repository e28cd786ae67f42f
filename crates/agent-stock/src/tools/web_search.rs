//! Web search tool

use agent_core::Result as AgentResult;
use agent_tools::{Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};

use super::names;
use crate::api::DuckDuckGoClient;

const DEFAULT_RESULTS: usize = 8;
const MAX_RESULTS: usize = 20;

/// General web search, used for news gaps and industry context
pub struct WebSearchTool {
    client: DuckDuckGoClient,
}

impl WebSearchTool {
    /// Create a new web search tool
    pub fn new(client: DuckDuckGoClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for WebSearchTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let query = required_str(&params, "query")?;
        let max_results = params
            .get("max_results")
            .and_then(Value::as_u64)
            .map_or(DEFAULT_RESULTS, |n| (n as usize).clamp(1, MAX_RESULTS));

        let results = self.client.search(query, max_results).await?;
        Ok(json!({
            "query": query,
            "results": results,
        }))
    }

    fn name(&self) -> &'static str {
        names::WEB_SEARCH
    }

    fn description(&self) -> &'static str {
        "Search the web. Returns result titles, full URLs and snippets. \
         Add words like 'news' or 'stock' to the query for market coverage."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "query": {
                    "type": "string",
                    "description": "Search query"
                },
                "max_results": {
                    "type": "integer",
                    "description": "Maximum number of results",
                    "minimum": 1,
                    "maximum": MAX_RESULTS,
                    "default": DEFAULT_RESULTS
                }
            },
            "required": ["query"]
        })
    }
}
