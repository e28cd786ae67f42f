//! Tool for reading a news article

use agent_core::Result as AgentResult;
use agent_tools::{Tool, required_str};
use async_trait::async_trait;
use serde_json::{Value, json};

use super::names;
use crate::api::ArticleReader;

/// Fetches an article and returns its title, date and text
pub struct ReadArticleTool {
    reader: ArticleReader,
}

impl ReadArticleTool {
    pub fn new(reader: ArticleReader) -> Self {
        Self { reader }
    }
}

#[async_trait]
impl Tool for ReadArticleTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let url = required_str(&params, "url")?;
        let article = self.reader.read(url).await?;
        serde_json::to_value(article)
            .map_err(|e| agent_core::Error::ProcessingFailed(e.to_string()))
    }

    fn name(&self) -> &'static str {
        names::READ_ARTICLE
    }

    fn description(&self) -> &'static str {
        "Download a news article by URL and return its title, site name, \
         publication time and the start of its text."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "url": {
                    "type": "string",
                    "description": "Full article URL"
                }
            },
            "required": ["url"]
        })
    }
}
